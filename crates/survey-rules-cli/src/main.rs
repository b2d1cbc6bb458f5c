fn main() -> anyhow::Result<()> {
    survey_rules_cli::cli::main()
}
