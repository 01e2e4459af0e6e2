use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text or json"
            ));
        }
    }
    if let Some(marker) = args.marker.as_deref() {
        if marker.is_empty() {
            return Err("invalid --marker, expected non-empty text".to_string());
        }
    }
    if let Some(payload) = args.payload_inline.as_deref() {
        if payload.is_empty() {
            return Err("invalid --payload-inline, expected non-empty text".to_string());
        }
    }
    if let Some(target) = args.target.as_deref() {
        if target.trim().is_empty() {
            return Err("invalid --target, expected a file path".to_string());
        }
    }
    if args.verbose > 3 {
        return Err("invalid verbosity, expected at most -vvv".to_string());
    }
    Ok(())
}
