use std::process::ExitCode;

fn main() -> ExitCode {
    match scriptsplice::app::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            scriptsplice::app::report_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}
