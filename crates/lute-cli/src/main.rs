use std::{env, fs, io, process::ExitCode};

use lute::{InterpretResult, Runner, StdPrint};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(file_path) = args.get(1) else {
        eprintln!("usage: lute <script>");
        return ExitCode::from(64);
    };

    let source = match read_file(file_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read {file_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut runner = match Runner::new(&source, file_path) {
        Ok(runner) => runner,
        Err(errors) => {
            for error in &errors {
                eprintln!("{error}");
            }
            return ExitCode::from(InterpretResult::CompileError.exit_code());
        }
    };

    let result = runner.interpret(&mut StdPrint);
    ExitCode::from(result.exit_code())
}

fn read_file(path: &str) -> io::Result<String> {
    fs::read_to_string(path)
}
