use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    bot::context::BotContext,
    error::AppError,
    service::{apprenticeship::sync_if_idle, unban::SoftBanExpiryService},
};

/// Top of every hour.
const APPRENTICESHIP_SYNC_SCHEDULE: &str = "0 0 * * * *";

/// Half past every hour, away from the sync.
const SOFT_BAN_EXPIRY_SCHEDULE: &str = "0 30 * * * *";

/// Starts the hourly apprenticeship sync and soft ban expiry jobs.
///
/// The returned scheduler is kept by the caller and shut down on teardown.
///
/// # Arguments
/// - `app`: Bot context shared with the jobs
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler
/// - `Err(AppError::SchedulerErr)` - A job could not be created or the scheduler failed to start
pub async fn start_scheduler(app: BotContext) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let sync_app = app.clone();
    let sync_job = Job::new_async(APPRENTICESHIP_SYNC_SCHEDULE, move |_uuid, _lock| {
        let app = sync_app.clone();

        Box::pin(async move {
            match sync_if_idle(&app).await {
                Ok(Some(summary)) => tracing::info!("Apprenticeship sync finished: {}", summary),
                Ok(None) => tracing::info!("Apprenticeship sync already running, skipped"),
                Err(e) => tracing::error!("Apprenticeship sync failed: {}", e),
            }
        })
    })?;

    let unban_app = app;
    let unban_job = Job::new_async(SOFT_BAN_EXPIRY_SCHEDULE, move |_uuid, _lock| {
        let app = unban_app.clone();

        Box::pin(async move {
            if let Err(e) = lift_expired_soft_bans(&app).await {
                tracing::error!("Error lifting expired soft bans: {}", e);
            }
        })
    })?;

    scheduler.add(sync_job).await?;
    scheduler.add(unban_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(scheduler)
}

async fn lift_expired_soft_bans(app: &BotContext) -> Result<(), AppError> {
    let lifted = SoftBanExpiryService::new(&app.db, app.http.as_ref())
        .lift_expired(Utc::now())
        .await?;

    if lifted > 0 {
        tracing::info!("Lifted {} expired soft bans", lifted);
    }

    Ok(())
}
