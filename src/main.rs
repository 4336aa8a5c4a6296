mod telemetry;

use planner_api::Application;
use planner_infra::setup_context;
use std::io::{Error, ErrorKind};
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("planner_server".into(), "info".into());
    init_subscriber(subscriber).map_err(|e| Error::new(ErrorKind::Other, e))?;

    let context = setup_context()
        .await
        .map_err(|e| Error::new(ErrorKind::Other, e.to_string()))?;

    let app = Application::new(context).await?;
    app.start().await
}
