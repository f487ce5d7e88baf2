use serde::{Deserialize, Serialize};
use std::fmt;

/// Which artifact a generation run produces. Everything that varies per
/// kind (catalog entry, output filename, history title) switches on this
/// exhaustively, so a new kind fails to compile until every consumer
/// handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Readme,
    Gitignore,
    Requirements,
    License,
    CodeGen,
    Analysis,
    Docs,
}

impl GenerationKind {
    pub const ALL: [GenerationKind; 7] = [
        GenerationKind::Readme,
        GenerationKind::Gitignore,
        GenerationKind::Requirements,
        GenerationKind::License,
        GenerationKind::CodeGen,
        GenerationKind::Analysis,
        GenerationKind::Docs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::Readme => "readme",
            GenerationKind::Gitignore => "gitignore",
            GenerationKind::Requirements => "requirements",
            GenerationKind::License => "license",
            GenerationKind::CodeGen => "codegen",
            GenerationKind::Analysis => "analysis",
            GenerationKind::Docs => "docs",
        }
    }

    /// Default filename for the written artifact.
    pub fn output_filename(&self) -> &'static str {
        match self {
            GenerationKind::Readme => "README.md",
            GenerationKind::Gitignore => ".gitignore",
            GenerationKind::Requirements => "requirements.txt",
            GenerationKind::License => "LICENSE",
            GenerationKind::CodeGen | GenerationKind::Analysis | GenerationKind::Docs => {
                "generated.txt"
            }
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pre-authored prompt offered within a kind. `prompt` may contain
/// `{token}` placeholders filled in by the prompt builder.
#[derive(Debug, Clone, Copy)]
pub struct PromptOption {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub default_content: &'static str,
    pub placeholder: &'static str,
    pub options: &'static [PromptOption],
}

impl CatalogEntry {
    pub fn option(&self, id: &str) -> Option<&'static PromptOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

/// Synchronous, infallible lookup; the catalog is static data.
pub fn entry(kind: GenerationKind) -> &'static CatalogEntry {
    match kind {
        GenerationKind::Readme => &README,
        GenerationKind::Gitignore => &GITIGNORE,
        GenerationKind::Requirements => &REQUIREMENTS,
        GenerationKind::License => &LICENSE,
        GenerationKind::CodeGen => &CODEGEN,
        GenerationKind::Analysis => &ANALYSIS,
        GenerationKind::Docs => &DOCS,
    }
}

static README: CatalogEntry = CatalogEntry {
    title: "README Generator",
    description: "Create professional README files with AI assistance",
    options: &[
        PromptOption {
            id: "structural",
            label: "Structural Template",
            prompt: "Create a professional README.md for my project with the following structure:\n\
                     - Centered title with emoji and project name\n\
                     - Brief description highlighting key capabilities\n\
                     - Shield badges for technologies and license\n\
                     - Clear feature list with emojis for each feature\n\
                     - Tech stack section showing all technologies used\n\
                     - Detailed getting started guide with code blocks\n\
                     - Screenshots section\n\
                     - Standard sections for Contributing, License, and Support\n\
                     - Social links and author credits at the bottom\n\n\
                     Include modern styling with HTML center tags and proper markdown formatting.",
        },
        PromptOption {
            id: "features",
            label: "Features-First Template",
            prompt: "Generate a README.md that emphasizes features and technical capabilities:\n\
                     - Format with modern GitHub-style markdown\n\
                     - Start with eye-catching badges showing tech stack\n\
                     - Include a compelling project tagline\n\
                     - Create detailed feature descriptions with emoji icons for key features\n\
                     - Add installation instructions with environment setup\n\
                     - Include placeholder sections for screenshots\n\
                     - End with contribution guidelines and license\n\n\
                     Focus on making features engaging and clear for developers.\n\
                     Important: Include code blocks for installation steps and env setup.",
        },
        PromptOption {
            id: "visual",
            label: "Visual-Rich Template",
            prompt: "Design a visually appealing README.md that prioritizes layout and formatting:\n\
                     - Create an aesthetically pleasing header with centered project name\n\
                     - Add colorful shield.io badges for technologies, status, and license\n\
                     - Structure content with clear H2 headers using emoji icons\n\
                     - Include key sections:\n\
                       * Project introduction with tagline\n\
                       * Features list with descriptive emoji bullets\n\
                       * Getting started guide with bash commands\n\
                       * Screenshot placeholders\n\
                       * Future roadmap\n\
                       * Contact information\n\
                     - End with centered footer including social links\n\n\
                     Style using HTML center tags and markdown formatting\n\
                     Note: Focus on spacing, alignment, and visual hierarchy",
        },
        PromptOption {
            id: "modern-interactive",
            label: "Modern Interactive Template",
            prompt: "Create an engaging and interactive README.md with modern elements:\n\
                     - Start with an animated GIF or SVG logo placeholder\n\
                     - Add dynamic elements:\n\
                       * Expandable sections using HTML details/summary\n\
                       * Interactive table of contents with jump links\n\
                       * Collapsible code examples\n\
                       * Quick start command copy buttons\n\
                     - Include modern sections:\n\
                       * 🎯 Key Features with usage examples\n\
                       * 🚀 Quick Start guide\n\
                       * 🎨 UI/UX screenshots gallery\n\
                       * 🔧 Configuration options table\n\
                       * 📈 Performance metrics\n\
                       * 🤝 Community & Support links\n\
                       * 🗺️ Project roadmap\n\
                     - Add engagement elements:\n\
                       * Star History chart\n\
                       * Contributors section\n\
                       * Discord/Community badges\n\
                       * Documentation links\n\n\
                     Style with modern HTML and CSS-in-markdown techniques\n\
                     Focus on user interaction and engagement\n\
                     Include dark/light mode compatible elements",
        },
    ],
    default_content: "# 🚀 Project Name\n\n<div align=\"center\">\n\n\
                      ![Project Status](https://img.shields.io/badge/status-active-success.svg)\n\
                      ![License](https://img.shields.io/badge/license-MIT-blue.svg)\n\n\
                      A powerful description of your amazing project.\n\n</div>\n\n\
                      ## ✨ Features\n\n- 🎯 Feature 1\n- ⚡ Feature 2\n- 🔒 Feature 3\n\n\
                      ## 🛠️ Installation\n\n```bash\nnpm install\nnpm run dev\n```\n\n\
                      ## 📖 Usage\n\n## 🤝 Contributing\n\n## 📝 License\n\n## 📧 Contact",
    placeholder: "Describe your project (e.g., name, features, tech stack)...",
};

static GITIGNORE: CatalogEntry = CatalogEntry {
    title: ".gitignore Generator",
    description: "Generate .gitignore files for your project",
    options: &[
        PromptOption {
            id: "python",
            label: "Python",
            prompt: "Generate a .gitignore file for a Python project with the following custom patterns:\n{customPatterns}",
        },
        PromptOption {
            id: "node",
            label: "Node.js",
            prompt: "Generate a .gitignore file for a Node.js project with the following custom patterns:\n{customPatterns}",
        },
        PromptOption {
            id: "react",
            label: "React",
            prompt: "Generate a .gitignore file for a React project with the following custom patterns:\n{customPatterns}",
        },
        PromptOption {
            id: "vue",
            label: "Vue.js",
            prompt: "Generate a .gitignore file for a Vue.js project with the following custom patterns:\n{customPatterns}",
        },
        PromptOption {
            id: "angular",
            label: "Angular",
            prompt: "Generate a .gitignore file for an Angular project with the following custom patterns:\n{customPatterns}",
        },
        PromptOption {
            id: "django",
            label: "Django",
            prompt: "Generate a .gitignore file for a Django project with the following custom patterns:\n{customPatterns}",
        },
        PromptOption {
            id: "flutter",
            label: "Flutter",
            prompt: "Generate a .gitignore file for a Flutter project with the following custom patterns:\n{customPatterns}",
        },
        PromptOption {
            id: "dotnet",
            label: ".NET",
            prompt: "Generate a .gitignore file for a .NET project with the following custom patterns:\n{customPatterns}",
        },
    ],
    default_content: "",
    placeholder: "Enter additional files or patterns to ignore (e.g., *.log, .env, build/, dist/)",
};

static REQUIREMENTS: CatalogEntry = CatalogEntry {
    title: "Requirements Generator",
    description: "List your project dependencies with ease",
    options: &[],
    default_content: "# Dependencies\nnext.js\ntailwindcss\nframer-motion",
    placeholder: "Enter your project dependencies...",
};

static LICENSE: CatalogEntry = CatalogEntry {
    title: "License Generator",
    description: "Choose and generate appropriate licenses",
    options: &[
        PromptOption {
            id: "mit",
            label: "MIT License",
            prompt: "Generate an MIT License with the following details:\nProject Name: {projectName}\nAuthor: {author}\nYear: {year}",
        },
        PromptOption {
            id: "apache",
            label: "Apache License 2.0",
            prompt: "Generate an Apache 2.0 License with the following details:\nProject Name: {projectName}\nAuthor: {author}\nYear: {year}",
        },
        PromptOption {
            id: "gpl3",
            label: "GNU General Public License v3.0",
            prompt: "Generate a GNU GPL v3.0 License with the following details:\nProject Name: {projectName}\nAuthor: {author}\nYear: {year}",
        },
        PromptOption {
            id: "bsd",
            label: "BSD 3-Clause License",
            prompt: "Generate a BSD 3-Clause License with the following details:\nProject Name: {projectName}\nAuthor: {author}\nYear: {year}",
        },
        PromptOption {
            id: "isc",
            label: "ISC License",
            prompt: "Generate an ISC License with the following details:\nProject Name: {projectName}\nAuthor: {author}\nYear: {year}",
        },
    ],
    default_content: "",
    placeholder: "Select a license type and fill in the details...",
};

static CODEGEN: CatalogEntry = CatalogEntry {
    title: "Code Generation",
    description: "Generate code with AI assistance",
    options: &[
        PromptOption {
            id: "unit-test",
            label: "Unit Test Generation",
            prompt: "Generate a unit test for the following code:\n",
        },
        PromptOption {
            id: "interface",
            label: "TypeScript Interface",
            prompt: "Generate TypeScript interfaces for the following code:\n",
        },
        PromptOption {
            id: "api",
            label: "API Endpoint",
            prompt: "Generate an API endpoint boilerplate for:\n",
        },
    ],
    default_content: "// Generated code will appear here",
    placeholder: "Enter your code or requirements...",
};

static ANALYSIS: CatalogEntry = CatalogEntry {
    title: "Smart Code Analysis",
    description: "Analyze your code for improvements",
    options: &[
        PromptOption {
            id: "quality",
            label: "Code Quality Assessment",
            prompt: "Analyze code quality and suggest improvements:\n",
        },
        PromptOption {
            id: "security",
            label: "Security Scan",
            prompt: "Scan for security vulnerabilities in:\n",
        },
        PromptOption {
            id: "performance",
            label: "Performance Check",
            prompt: "Suggest performance optimizations for:\n",
        },
        PromptOption {
            id: "practices",
            label: "Best Practices",
            prompt: "Recommend best practices for:\n",
        },
    ],
    default_content: "# Code Analysis Report\n\n## Findings\n\n## Recommendations",
    placeholder: "Paste your code for analysis...",
};

static DOCS: CatalogEntry = CatalogEntry {
    title: "Advanced Documentation",
    description: "Generate comprehensive documentation",
    options: &[
        PromptOption {
            id: "api-docs",
            label: "API Documentation",
            prompt: "Generate API documentation for:\n",
        },
        PromptOption {
            id: "comments",
            label: "Code Comments",
            prompt: "Generate detailed comments for:\n",
        },
        PromptOption {
            id: "function-docs",
            label: "Function Documentation",
            prompt: "Generate function documentation for:\n",
        },
        PromptOption {
            id: "architecture",
            label: "Architecture Diagrams",
            prompt: "Generate architecture diagram in markdown for:\n",
        },
    ],
    default_content: "# Documentation\n\n## Overview\n\n## Details",
    placeholder: "Enter your code or API endpoints...",
};

/// Offline starter bodies, usable without any backend.
#[derive(Debug, Clone, Copy)]
pub struct StarterTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub content: &'static str,
}

pub static README_STARTERS: &[StarterTemplate] = &[
    StarterTemplate {
        id: "minimal",
        name: "Minimal",
        description: "A clean, simple README template",
        content: "# Project Name\n\nBrief description of the project.\n\n## Installation\n\n## Usage\n\n## License",
    },
    StarterTemplate {
        id: "detailed",
        name: "Detailed",
        description: "A comprehensive README template",
        content: "# Project Name\n\n## Description\n\n## Features\n\n## Installation\n\n## Usage\n\n## Contributing\n\n## Tests\n\n## License",
    },
    StarterTemplate {
        id: "opensource",
        name: "Open Source",
        description: "Perfect for open source projects",
        content: "# Project Name\n\n## About\n\n## Getting Started\n\n## Contributing\n\n## Code of Conduct\n\n## License",
    },
];

pub static GITIGNORE_STARTERS: &[StarterTemplate] = &[
    StarterTemplate {
        id: "node",
        name: "Node.js",
        description: "Standard Node.js template",
        content: "node_modules/\n.env\n.DS_Store\ndist/\nbuild/",
    },
    StarterTemplate {
        id: "python",
        name: "Python",
        description: "Standard Python template",
        content: "__pycache__/\n*.py[cod]\n.env\nvenv/\n.pytest_cache/",
    },
    StarterTemplate {
        id: "web",
        name: "Web Project",
        description: "Template for web projects",
        content: "node_modules/\ndist/\n.env\n.DS_Store\n*.log",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_resolves() {
        for kind in GenerationKind::ALL {
            let e = entry(kind);
            assert!(!e.title.is_empty(), "{kind} has no title");
        }
    }

    #[test]
    fn option_ids_unique_within_entry() {
        for kind in GenerationKind::ALL {
            let e = entry(kind);
            let ids: HashSet<_> = e.options.iter().map(|o| o.id).collect();
            assert_eq!(ids.len(), e.options.len(), "duplicate option id in {kind}");
        }
    }

    #[test]
    fn license_options_carry_all_tokens() {
        for opt in entry(GenerationKind::License).options {
            for token in ["{projectName}", "{author}", "{year}"] {
                assert!(opt.prompt.contains(token), "{} missing {token}", opt.id);
            }
        }
    }

    #[test]
    fn gitignore_options_take_custom_patterns() {
        for opt in entry(GenerationKind::Gitignore).options {
            assert!(opt.prompt.contains("{customPatterns}"), "{} missing token", opt.id);
        }
    }

    #[test]
    fn output_filenames_follow_kind() {
        assert_eq!(GenerationKind::Readme.output_filename(), "README.md");
        assert_eq!(GenerationKind::Gitignore.output_filename(), ".gitignore");
        assert_eq!(GenerationKind::License.output_filename(), "LICENSE");
        assert_eq!(GenerationKind::Requirements.output_filename(), "requirements.txt");
        assert_eq!(GenerationKind::Docs.output_filename(), "generated.txt");
    }
}
