use std::time::Instant;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::spam::SpamFilter};

/// Every ten minutes, on the minute.
const SCHEDULE: &str = "0 */10 * * * *";

/// Starts the spam filter cleanup scheduler
///
/// The filter only trims a user's timestamps when that user posts again, so users who
/// went quiet would stay in memory forever without this job.
///
/// # Arguments
/// - `spam`: Spam filter shared with the message handler
///
/// # Returns
/// - `Ok(JobScheduler)` - The running scheduler; keep it alive for the job to fire
/// - `Err(AppError::SchedulerErr)` - The job could not be created or started
pub async fn start_scheduler(spam: SpamFilter) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let spam = spam.clone();

        Box::pin(async move {
            let forgotten = spam.prune(Instant::now());
            tracing::debug!(
                "Ran spam filter cleanup: forgot {} users, tracking {}",
                forgotten,
                spam.tracked_users()
            );
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Spam filter cleanup scheduler started");

    Ok(scheduler)
}
