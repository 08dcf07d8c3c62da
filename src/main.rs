use reelsearch::run;

fn main() -> anyhow::Result<()> {
    // One interactive session at a time; every action awaits its round trip.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run())
}
