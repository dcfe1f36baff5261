use common::error::{AppError, Res};
use db::{
    dtos::{campaign::CampaignOutcome, sms_campaign::SmsCampaignCreateRecord},
    models::campaign::{SendResult, outcome_status},
};
use delivery::sms::SmsGatewayClient;
use quota::guard::{self, Resource};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::sms_campaign::{SmsCampaignSendRequest, SmsCampaignSendResponse};

/// Sends a bulk SMS campaign through the user's Android gateway device.
///
/// Same reconciliation rules as the email path: over-quota numbers are
/// blocked without being attempted, individual failures don't abort the
/// batch, and only successful sends stay charged against the quota.
pub async fn send_bulk_sms(
    pool: &PgPool,
    user_id: Uuid,
    req: SmsCampaignSendRequest,
) -> Res<SmsCampaignSendResponse> {
    let SmsCampaignSendRequest {
        title,
        gateway_id,
        numbers,
        message,
    } = req;

    let numbers: Vec<String> = numbers
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    if title.trim().is_empty() || message.trim().is_empty() || numbers.is_empty() {
        return Err(AppError::BadRequest(
            "All required fields must be provided.".to_string(),
        ));
    }

    let gateway = db::gateway::get_owned(pool, gateway_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Gateway not found".to_string()))?;

    // claim quota before any delivery is attempted
    let reservation = guard::reserve(pool, user_id, Resource::Sms, numbers.len()).await?;
    let (to_send, blocked) = guard::partition(numbers.clone(), reservation.granted);

    let campaign = db::sms_campaign::insert_campaign(
        pool,
        SmsCampaignCreateRecord {
            user_id,
            gateway_id,
            title,
            numbers,
            message: message.clone(),
        },
    )
    .await?;

    let client = SmsGatewayClient::new();
    let mut results: Vec<SendResult> = Vec::with_capacity(to_send.len() + blocked.len());
    let mut sent_count = 0usize;
    let mut failed_count = 0usize;

    for number in to_send {
        match client.send_sms(&gateway, &number, &message).await {
            Ok(true) => {
                sent_count += 1;
                results.push(SendResult::sent(number));
            }
            Ok(false) => {
                failed_count += 1;
                results.push(SendResult::failed(number));
            }
            Err(err) => {
                log::warn!("Failed to send SMS to {}: {}", number, err);
                failed_count += 1;
                results.push(SendResult::failed(number));
            }
        }
    }

    for number in blocked {
        results.push(SendResult::blocked(number));
        failed_count += 1;
    }

    let campaign = db::sms_campaign::finalize_campaign(
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

    guard::settle(pool, user_id, Resource::Sms, reservation, sent_count).await?;

    Ok(SmsCampaignSendResponse {
        message: "Bulk SMS processed".to_string(),
        total_contacts: campaign.total_contacts as usize,
        sent_count,
        failed_count,
        results,
        campaign,
    })
}
