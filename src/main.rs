use clap::Parser;
use imsearch_client::Opts;
use imsearch_client::cli::SubCommandExtend;
use imsearch_client::config::SubCommand;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();

    match &opts.subcmd {
        SubCommand::Search(cmd) => cmd.run(&opts).await,
        SubCommand::Gallery(cmd) => cmd.run(&opts).await,
        SubCommand::Interactive(cmd) => cmd.run(&opts).await,
        SubCommand::Health(cmd) => cmd.run(&opts).await,
        SubCommand::Reindex(cmd) => cmd.run(&opts).await,
    }
}
