/*!

The `kubetest2-aks` binary hands the AKS deployer to the harness agent, which runs the lifecycle
verbs given on the command line, e.g. `kubetest2-aks --up --resource-group rg --template t.json`.

!*/

use agent_utils::init_agent_logger;
use aks_deployer::AksDeployer;
use clap::ArgMatches;
use deployer::error::AgentResult;
use deployer::{log_level, Agent, Options};

#[tokio::main]
async fn main() {
    let options = match Options::from_env() {
        Ok(ok) => ok,
        Err(e) => {
            eprintln!("Unable to get harness options: {}", e);
            std::process::exit(1);
        }
    };
    let (deployer, flags) = aks_deployer::new(&options);
    let matches = flags.get_matches();
    init_agent_logger(env!("CARGO_CRATE_NAME"), log_level(&matches));

    if let Err(e) = run(deployer, &matches).await {
        eprintln!("{}", e);
        std::process::exit(1);
    };
}

async fn run(deployer: AksDeployer, matches: &ArgMatches) -> AgentResult<()> {
    let mut agent = Agent::new(deployer, matches)?;
    agent.run().await
}
