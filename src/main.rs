fn main() -> anyhow::Result<()> {
    becandidature::cli::run()
}
