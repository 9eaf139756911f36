use anyhow::Result;
use client::invitations::InvitationList;
use shared::{config::client::ClientConfig, models::Invitation};

use super::session::Session;

/// Prints the invitations to other users' stores.
pub async fn list(config: &ClientConfig) -> Result<()> {
    let session = Session::open(config)?;
    let mut list = InvitationList::default();
    list.refresh(&session.api()).await?;

    if list.invitations().is_empty() {
        println!("No invitations.");
    }
    for invitation in list.invitations() {
        print_invitation(invitation);
    }
    session.save()
}

fn print_invitation(invitation: &Invitation) {
    let role = invitation
        .role
        .as_deref()
        .map(|role| format!(" as {role}"))
        .unwrap_or_default();
    println!(
        "{} \"{}\" from {}{role}",
        invitation.id, invitation.store_name, invitation.inviter_name
    );
    println!("    to: {}", invitation.invitee_email);
    if let Some(created) = invitation.created() {
        println!("    sent: {}", created.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(message) = invitation.message() {
        println!("    \"{message}\"");
    }
}
