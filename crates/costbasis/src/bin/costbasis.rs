//! costbasis - Evaluate hypothetical share sales with FIFO cost basis.

fn main() -> std::process::ExitCode {
    costbasis::cmd::sale::main()
}
