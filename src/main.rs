use anyhow::Result;
use param_pass_timing::{run_eval, EvalParams, EvalState};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<u8> {
    let params = EvalParams::production();
    let mut state = EvalState::default();

    let mut out = io::stdout().lock();
    run_eval(&params, &mut state, &mut out)?;
    out.flush()?;

    // The exit code folds in the accumulated sums so the timed loops stay
    // observable; it is not a status code.
    Ok(state.exit_code())
}
