use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// External backend addressed by the dispatch gateway.
#[derive(ValueEnum, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    #[value(alias = "google")]
    Gemini,
    #[value(alias = "grok")]
    Xai,
}

#[derive(Parser, Debug)]
#[command(
    name = "devforge",
    version,
    about = "AI-assisted scaffolding for project-root files"
)]
pub struct Cli {
    /// Backend to generate with (overrides the config file).
    #[arg(long, value_enum, global = true)]
    pub model: Option<ModelKind>,

    /// TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print raw HTTP traffic and artifact paths to stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Keep this run out of the generation history.
    #[arg(long, global = true, default_value_t = false)]
    pub no_history: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a README.md
    Readme {
        /// Catalog template: structural, features, visual, modern-interactive.
        #[arg(long, default_value = "structural")]
        template: String,

        /// Project context appended to the template prompt.
        #[arg(long)]
        context: Option<String>,

        /// Skip the catalog and build the prompt from the context alone.
        #[arg(long, default_value_t = false, requires = "context")]
        simple: bool,

        /// Emit a built-in starter (minimal, detailed, opensource) without
        /// calling any backend.
        #[arg(long, conflicts_with_all = ["template", "context", "simple", "offline"])]
        starter: Option<String>,

        /// Emit the offline scaffold without calling any backend.
        #[arg(long, default_value_t = false, conflicts_with_all = ["context", "simple"])]
        offline: bool,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Generate a .gitignore
    Gitignore {
        /// Catalog template: python, node, react, vue, angular, django, flutter, dotnet.
        #[arg(long, required_unless_present = "starter")]
        template: Option<String>,

        /// Extra files or patterns to ignore (e.g. "*.log, .env").
        #[arg(long)]
        patterns: Option<String>,

        /// Emit a built-in starter (node, python, web) without calling any
        /// backend.
        #[arg(long, conflicts_with_all = ["template", "patterns"])]
        starter: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Generate a LICENSE
    License {
        /// License type: mit, apache, gpl3, bsd, isc.
        #[arg(long = "type")]
        license_type: String,

        #[arg(long)]
        project: String,

        #[arg(long)]
        author: String,

        /// Defaults to the current year.
        #[arg(long)]
        year: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Generate a requirements.txt
    Requirements {
        /// Dependency list or free-form description.
        deps: Option<String>,

        /// Analyze a source file and infer its dependencies instead.
        #[arg(long, conflicts_with = "deps")]
        from_code: Option<PathBuf>,

        /// Treat --from-code input as a Python script.
        #[arg(long, default_value_t = false, requires = "from_code")]
        script: bool,

        /// Also print the derived pip install command.
        #[arg(long, default_value_t = false)]
        install_cmd: bool,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Generate code (unit tests, interfaces, endpoint boilerplate)
    Codegen {
        /// Catalog template: unit-test, interface, api.
        #[arg(long)]
        template: String,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Analyze code and report dependencies, licenses, recommendations
    Analysis {
        /// Free-form catalog template (quality, security, performance,
        /// practices) instead of the structured report.
        #[arg(long)]
        template: Option<String>,

        #[command(flatten)]
        input: InputArgs,

        /// Print the raw analysis JSON instead of the report.
        #[arg(long, default_value_t = false, conflicts_with = "template")]
        json: bool,
    },

    /// Generate documentation
    Docs {
        /// Catalog template: api-docs, comments, function-docs, architecture.
        #[arg(long)]
        template: String,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// List the generation kinds and their catalog templates
    Kinds,

    /// Inspect or clear the generation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Manage custom templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
}

/// Where a generated artifact goes besides stdout.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Write the result to this path.
    #[arg(long, conflicts_with = "save")]
    pub out: Option<PathBuf>,

    /// Write the result to the kind's default filename.
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

/// Free text for the prompt: inline, or read from a file.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Inline input text.
    pub text: Option<String>,

    /// Read input from a file instead.
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List recorded generations, newest first.
    List,
    /// Print the stored content of one entry.
    Show { id: Uuid },
    /// Remove all entries.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplateAction {
    /// List saved templates.
    List {
        /// Show the built-in starter templates instead.
        #[arg(long, default_value_t = false)]
        builtin: bool,
    },
    /// Save a new template.
    Save {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// File holding the template body.
        #[arg(long)]
        content: PathBuf,
        /// Comma-separated tags.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// Update fields of a saved template.
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// File holding the new template body.
        #[arg(long)]
        content: Option<PathBuf>,
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a saved template.
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Export all saved templates to a JSON file.
    Export {
        /// Target path; defaults to devforge-templates.json.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import templates from a JSON export.
    Import { file: PathBuf },
}
