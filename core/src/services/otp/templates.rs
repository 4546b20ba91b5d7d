//! Passcode email wording

use crate::domain::entities::OtpPurpose;

use super::traits::EmailMessage;

const BRAND: &str = "TradeGuider";

pub fn render_email(to: &str, purpose: OtpPurpose, code: &str, ttl_seconds: u64) -> EmailMessage {
    let minutes = ttl_seconds.div_ceil(60);
    let (subject, heading, intro) = match purpose {
        OtpPurpose::Registration => (
            format!("Use code {} to set up your {} account", code, BRAND),
            "Verification Code for Your Account",
            format!(
                "<p>Thanks for signing up with {}!</p>\n<p>Here's your code to finish setting up your account:</p>",
                BRAND
            ),
        ),
        OtpPurpose::Login => (
            format!("Use code {} to login to your {} account", code, BRAND),
            "Login Code for Your Account",
            "<p>Here's your code to log into your account:</p>".to_string(),
        ),
    };

    let html_body = format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
<h2>{heading}</h2>
<p>Hi,</p>
{intro}
<h1 style="font-size: 32px; background-color: #f0f0f0; padding: 10px; text-align: center; letter-spacing: 5px;">{code}</h1>
<p>This code will expire in {minutes} minutes.</p>
<p><strong>Important:</strong> If you didn't request this code, please ignore this email.</p>
<p>Best regards,<br>The {brand} Team</p>
</body>
</html>"#,
        heading = heading,
        intro = intro,
        code = code,
        minutes = minutes,
        brand = BRAND,
    );

    EmailMessage {
        to: to.to_string(),
        subject,
        html_body,
    }
}
