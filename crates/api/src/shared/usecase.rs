use planner_infra::PlannerContext;
use std::fmt::Debug;
use tracing::error;

/// One request worth of work against the `PlannerContext`
#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response;
    type Error;

    const NAME: &'static str;

    async fn execute(&mut self, ctx: &PlannerContext) -> Result<Self::Response, Self::Error>;
}

#[tracing::instrument(name = "UseCase executed", skip(usecase, ctx), fields(usecase = %U::NAME))]
pub async fn execute<U>(mut usecase: U, ctx: &PlannerContext) -> Result<U::Response, U::Error>
where
    U: UseCase,
    U::Error: Debug,
{
    let res = usecase.execute(ctx).await;

    if let Err(e) = &res {
        error!("Use case error: {:?}", e);
    }

    res
}

/// Logs a repository failure and replaces it with `error`
pub fn storage_failure<E>(error: E) -> impl FnOnce(anyhow::Error) -> E {
    move |e| {
        error!("Storage failure: {:?}", e);
        error
    }
}
