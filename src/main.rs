fn main() -> eyre::Result<()> {
    thumbdir::main()
}
