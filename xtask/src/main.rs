mod gen;

fn main() {
    let task = std::env::args().nth(1);
    match task.as_deref() {
        Some("gen") => gen::gen(),
        _ => {
            eprintln!("Usage: cargo xtask <TASK>\n\nTasks:\n    gen    Generate shell completions");
            std::process::exit(1);
        }
    }
}
