fn main() -> anyhow::Result<()> {
    kgtk_compact::cli::run()
}
