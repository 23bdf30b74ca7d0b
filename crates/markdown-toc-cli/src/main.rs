use std::process;

fn main() {
    match markdown_toc_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("markdown-toc error: {err}");
            process::exit(markdown_toc::ExitCode::Usage as i32);
        }
    }
}
