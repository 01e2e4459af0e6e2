use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "scriptsplice",
    version,
    about = "splice a JavaScript payload before the last </script> of an HTML page",
    long_about = "scriptsplice inserts a block of text immediately before the last occurrence of a marker (</script> by default) and overwrites the document in place.\n\nExamples:\n  scriptsplice -t ./callsanta/index.html\n  scriptsplice -t index.html --payload ./restored.js --dry-run --print\n  scriptsplice -t index.html --skip-if-present -o json\n\nNote: running twice inserts the payload twice unless --skip-if-present is set."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv, -vvv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Report format (text or json)."
    )]
    pub output_format: Option<String>,

    #[arg(
        long = "pr",
        visible_alias = "print",
        help_heading = "Output",
        help = "Write the resulting document to stdout."
    )]
    pub print: bool,

    #[arg(
        short = 't',
        long = "tg",
        visible_alias = "target",
        value_name = "FILE",
        help_heading = "Input",
        help = "HTML document to patch in place."
    )]
    pub target: Option<String>,

    #[arg(
        short = 'p',
        long = "pl",
        visible_alias = "payload",
        value_name = "FILE",
        conflicts_with = "payload_inline",
        help_heading = "Input",
        help = "Read the payload from a file instead of the built-in checkout block."
    )]
    pub payload: Option<String>,

    #[arg(
        long = "pi",
        visible_alias = "payload-inline",
        value_name = "TEXT",
        help_heading = "Input",
        help = "Use TEXT as the payload."
    )]
    pub payload_inline: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.scriptsplice/config.yml when present)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a default config file and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'm',
        long = "mk",
        visible_alias = "marker",
        value_name = "TEXT",
        help_heading = "Patch",
        help = "Insert before the last occurrence of TEXT (default: </script>)."
    )]
    pub marker: Option<String>,

    #[arg(
        short = 'n',
        long = "dr",
        visible_alias = "dry-run",
        help_heading = "Patch",
        help = "Compute the patch without writing the document."
    )]
    pub dry_run: bool,

    #[arg(
        short = 's',
        long = "sip",
        visible_alias = "skip-if-present",
        help_heading = "Patch",
        help = "Leave the document unchanged if it already contains the payload."
    )]
    pub skip_if_present: bool,
}
