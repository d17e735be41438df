const BARCODE_BASE_URL: &str = "https://www.google.com/chart?chs=200x200&chld=M|0&cht=qr&chl=";

/// `otpauth://totp/{user}@{domain}?secret={secret}`
///
/// No percent-encoding is applied; reserved characters in `user` or
/// `domain` pass through as-is.
pub fn build_otpauth_uri(user: &str, domain: &str, secret: &str) -> String {
    format!("otpauth://totp/{}@{}?secret={}", user, domain, secret)
}

/// Chart URL that renders the otpauth URI as a QR code
pub fn build_barcode_url(user: &str, domain: &str, secret: &str) -> String {
    format!("{}{}", BARCODE_BASE_URL, build_otpauth_uri(user, domain, secret))
}
