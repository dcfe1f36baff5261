use common::error::{AppError, Res};
use db::{
    dtos::campaign::{CampaignCreateRecord, CampaignOutcome},
    models::campaign::{SendResult, outcome_status},
};
use delivery::smtp::Mailer;
use quota::guard::{self, Resource};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::campaign::{CampaignSendRequest, CampaignSendResponse};

/// Sends an email campaign through the user's SMTP config and records it.
///
/// Recipients beyond the remaining monthly allowance are never attempted;
/// they are reported as blocked and counted as failures. Delivery continues
/// past individual failures, and the usage counter ends up increased by the
/// number of successful sends only.
pub async fn create_and_send_campaign(
    pool: &PgPool,
    user_id: Uuid,
    req: CampaignSendRequest,
) -> Res<CampaignSendResponse> {
    let CampaignSendRequest {
        name,
        subject,
        smtp_id,
        recipients,
        message,
    } = req;

    let recipients = recipients.into_vec();
    if name.trim().is_empty()
        || subject.trim().is_empty()
        || message.trim().is_empty()
        || recipients.is_empty()
    {
        return Err(AppError::BadRequest(
            "All required fields must be provided.".to_string(),
        ));
    }

    let smtp_config = db::smtp::get_owned(pool, smtp_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("SMTP configuration not found".to_string()))?;
    let mailer = Mailer::from_config(&smtp_config)?;

    // claim quota before any delivery is attempted
    let reservation = guard::reserve(pool, user_id, Resource::Email, recipients.len()).await?;
    let (to_send, blocked) = guard::partition(recipients.clone(), reservation.granted);

    let campaign = db::campaign::insert_campaign(
        pool,
        CampaignCreateRecord {
            user_id,
            name,
            subject,
            smtp_id,
            recipients,
            message: message.clone(),
        },
    )
    .await?;

    let mut results: Vec<SendResult> = Vec::with_capacity(to_send.len() + blocked.len());
    let mut sent_count = 0usize;
    let mut failed_count = 0usize;
    let total = to_send.len();

    // one in-flight send at a time; a slow relay throttles us instead of the
    // other way around
    for email in to_send {
        match mailer.send(&email, &campaign.subject, &message).await {
            Ok(()) => {
                sent_count += 1;
                log::debug!("Progress: {}/{} emails sent", sent_count, total);
                results.push(SendResult::sent(email));
            }
            Err(err) => {
                log::warn!("Failed to send email to {}: {}", email, err);
                failed_count += 1;
                results.push(SendResult::failed(email));
            }
        }
    }

    for email in blocked {
        results.push(SendResult::blocked(email));
        failed_count += 1;
    }

    let campaign = db::campaign::finalize_campaign(
        pool,
        campaign.id,
        CampaignOutcome {
            sent_count: sent_count as i32,
            failed_count: failed_count as i32,
            status: outcome_status(sent_count, failed_count).to_string(),
            results: results.clone(),
        },
    )
    .await?;

    guard::settle(pool, user_id, Resource::Email, reservation, sent_count).await?;

    Ok(CampaignSendResponse {
        message: "Campaign sent and saved successfully".to_string(),
        total_recipients: campaign.recipients.len(),
        sent_count,
        failed_count,
        results,
        campaign,
    })
}
