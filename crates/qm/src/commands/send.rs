//! Send command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::Args;
use quartermaster_core::container::ServiceContext;
use quartermaster_core::services::mail::{MailConfig, MailService};

/// Send an email through the mail service
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Recipient address
    #[arg(long)]
    to: String,

    /// Subject line
    #[arg(long)]
    subject: String,

    /// Message body
    #[arg(long)]
    body: String,

    /// Sender address (default: the configured sender)
    #[arg(long)]
    from: Option<String>,

    /// Service to send through
    #[arg(long, default_value = "mail")]
    service: String,

    /// Show what would be sent without sending
    #[arg(long)]
    dry_run: bool,
}

/// Execute the send command
pub fn execute(global: &GlobalArgs, args: SendArgs) -> Result<()> {
    let mut ctx = super::setup(global)?;

    if args.dry_run {
        // No token, no transport: resolve the sender from config and show
        // the message that would go out
        let mail_config = MailConfig::from_table(ctx.config.service_config(&args.service));
        let from = args
            .from
            .as_deref()
            .or(mail_config.sender.as_deref())
            .unwrap_or("<unset>");

        println!("Dry run - would send message:");
        println!("  To: {}", args.to);
        println!("  From: {from}");
        println!("  Subject: {}", args.subject);
        println!("  Body: {}", args.body);
        return Ok(());
    }

    ctx.container.start(&[args.service.as_str()])?;

    let service_ctx = ServiceContext::for_service(&ctx.config, &ctx.home_dir, &args.service);
    let service = ctx
        .container
        .get_mut(&args.service)
        .ok_or_else(|| anyhow::anyhow!("service '{}' is not loaded", args.service))?;
    service.init(&service_ctx)?;

    let mail = ctx
        .container
        .service::<MailService>(&args.service)
        .ok_or_else(|| {
            anyhow::anyhow!("service '{}' cannot send mail", args.service)
        })?;

    let receipt = mail.send_message(args.from.as_deref(), &args.to, &args.subject, &args.body)?;

    println!("Message sent");
    println!("  Id: {}", receipt.id);
    if let Some(thread_id) = receipt.thread_id {
        println!("  Thread: {thread_id}");
    }
    if !receipt.label_ids.is_empty() {
        println!("  Labels: {}", receipt.label_ids.join(", "));
    }
    Ok(())
}
