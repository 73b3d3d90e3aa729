use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "scval", version, about = "Contract value encoder/decoder")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Maximum nesting depth accepted while converting and decoding.
    #[arg(long, global = true, default_value_t = 128)]
    pub max_depth: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the functions declared by a contract spec.
    Functions {
        /// Contract spec JSON file.
        #[arg(long)]
        spec: String,
    },

    /// Encode named JSON arguments into base64 wire values.
    Encode {
        #[arg(long)]
        spec: String,
        #[arg(long)]
        function: String,
        /// JSON object of arguments, or @path to a JSON file.
        #[arg(long)]
        args: String,
    },

    /// Decode a base64 return value by the function's declared output.
    Decode {
        #[arg(long)]
        spec: String,
        #[arg(long)]
        function: String,
        #[arg(long)]
        xdr: String,
    },

    /// Decode a base64 wire value without type guidance.
    Inspect {
        #[arg(long)]
        xdr: String,
    },

    /// Decode an emitted event.
    Event {
        #[arg(long)]
        spec: String,
        /// Event name as declared in the spec.
        #[arg(long)]
        name: String,
        /// Comma-separated base64 topics.
        #[arg(long, value_delimiter = ',')]
        topics: Vec<String>,
        /// Base64 event data.
        #[arg(long)]
        data: String,
    },
}
