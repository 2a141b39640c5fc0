fn main() -> Result<(), Box<dyn std::error::Error>> {
    copilot_chat::cli::main()
}
