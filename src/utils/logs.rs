use tracing::warn;
use crate::core::domain::Configuration;

// required to enable CloudWatch error logging by the runtime
pub fn setup_tracing(config: &Configuration) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .json()
        .try_init();
    for warning in &config.warnings {
        warn!("{}", warning);
    }
}
