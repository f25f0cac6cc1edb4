//! Outgoing mail table

use crate::database::{set_text, text, Record, RecordReader, RecordWriter, TextTooLong};

pub const DEFAULT_SENDING_DOMAIN_MAX_SIZE: usize = 50;
pub const DEFAULT_MAIL_HOST_MAX_SIZE: usize = DEFAULT_SENDING_DOMAIN_MAX_SIZE;
pub const DEFAULT_MAIL_USERNAME_MAX_SIZE: usize = 100;
pub const DEFAULT_MAIL_PASSWORD_MAX_SIZE: usize = DEFAULT_MAIL_HOST_MAX_SIZE;
pub const DEFAULT_MAIL_FROM_MAX_SIZE: usize = DEFAULT_MAIL_HOST_MAX_SIZE;
pub const DEFAULT_MAIL_FROM_NAME_MAX_SIZE: usize = DEFAULT_MAIL_HOST_MAX_SIZE;
pub const DEFAULT_MAIL_TO_MAX_SIZE: usize = DEFAULT_MAIL_FROM_MAX_SIZE;
pub const DEFAULT_MAIL_SUBJECT_MAX_SIZE: usize = DEFAULT_MAIL_HOST_MAX_SIZE;

pub const DEFAULT_MAIL_PORT: u16 = 2525;
pub const DEFAULT_MAIL_SUBJECT: &str = "device status";
/// Seconds between status mails
pub const DEFAULT_MAIL_FREQUENCY: u16 = 300;

/// SMTP relay and message settings
///
/// Server credentials default to empty; devices provision them at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailConfig {
    pub sending_domain: [u8; DEFAULT_SENDING_DOMAIN_MAX_SIZE],
    pub mail_host: [u8; DEFAULT_MAIL_HOST_MAX_SIZE],
    pub mail_port: u16,
    pub mail_username: [u8; DEFAULT_MAIL_USERNAME_MAX_SIZE],
    pub mail_password: [u8; DEFAULT_MAIL_PASSWORD_MAX_SIZE],
    pub mail_from: [u8; DEFAULT_MAIL_FROM_MAX_SIZE],
    pub mail_from_name: [u8; DEFAULT_MAIL_FROM_NAME_MAX_SIZE],
    pub mail_to: [u8; DEFAULT_MAIL_TO_MAX_SIZE],
    pub mail_subject: [u8; DEFAULT_MAIL_SUBJECT_MAX_SIZE],
    pub mail_frequency: u16,
}

impl EmailConfig {
    pub fn sending_domain(&self) -> &str {
        text(&self.sending_domain)
    }

    pub fn mail_host(&self) -> &str {
        text(&self.mail_host)
    }

    pub fn mail_username(&self) -> &str {
        text(&self.mail_username)
    }

    pub fn mail_password(&self) -> &str {
        text(&self.mail_password)
    }

    pub fn mail_from(&self) -> &str {
        text(&self.mail_from)
    }

    pub fn mail_from_name(&self) -> &str {
        text(&self.mail_from_name)
    }

    pub fn mail_to(&self) -> &str {
        text(&self.mail_to)
    }

    pub fn mail_subject(&self) -> &str {
        text(&self.mail_subject)
    }

    /// Relay host, port and login
    pub fn set_server(
        &mut self,
        host: &str,
        port: u16,
        username: &str,
        password: &str,
    ) -> Result<(), TextTooLong> {
        if host.len() > DEFAULT_MAIL_HOST_MAX_SIZE
            || username.len() > DEFAULT_MAIL_USERNAME_MAX_SIZE
            || password.len() > DEFAULT_MAIL_PASSWORD_MAX_SIZE
        {
            return Err(TextTooLong);
        }
        set_text(&mut self.mail_host, host)?;
        set_text(&mut self.mail_username, username)?;
        set_text(&mut self.mail_password, password)?;
        self.mail_port = port;
        Ok(())
    }

    /// Sender and recipient addresses
    pub fn set_addresses(&mut self, from: &str, from_name: &str, to: &str) -> Result<(), TextTooLong> {
        if from.len() > DEFAULT_MAIL_FROM_MAX_SIZE
            || from_name.len() > DEFAULT_MAIL_FROM_NAME_MAX_SIZE
            || to.len() > DEFAULT_MAIL_TO_MAX_SIZE
        {
            return Err(TextTooLong);
        }
        set_text(&mut self.mail_from, from)?;
        set_text(&mut self.mail_from_name, from_name)?;
        set_text(&mut self.mail_to, to)
    }

    pub fn set_subject(&mut self, subject: &str) -> Result<(), TextTooLong> {
        set_text(&mut self.mail_subject, subject)
    }

    pub fn set_sending_domain(&mut self, domain: &str) -> Result<(), TextTooLong> {
        set_text(&mut self.sending_domain, domain)
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        let mut mail_subject = [0; DEFAULT_MAIL_SUBJECT_MAX_SIZE];
        mail_subject[..DEFAULT_MAIL_SUBJECT.len()].copy_from_slice(DEFAULT_MAIL_SUBJECT.as_bytes());
        Self {
            sending_domain: [0; DEFAULT_SENDING_DOMAIN_MAX_SIZE],
            mail_host: [0; DEFAULT_MAIL_HOST_MAX_SIZE],
            mail_port: DEFAULT_MAIL_PORT,
            mail_username: [0; DEFAULT_MAIL_USERNAME_MAX_SIZE],
            mail_password: [0; DEFAULT_MAIL_PASSWORD_MAX_SIZE],
            mail_from: [0; DEFAULT_MAIL_FROM_MAX_SIZE],
            mail_from_name: [0; DEFAULT_MAIL_FROM_NAME_MAX_SIZE],
            mail_to: [0; DEFAULT_MAIL_TO_MAX_SIZE],
            mail_subject,
            mail_frequency: DEFAULT_MAIL_FREQUENCY,
        }
    }
}

impl Record for EmailConfig {
    const SIZE: usize = DEFAULT_SENDING_DOMAIN_MAX_SIZE
        + DEFAULT_MAIL_HOST_MAX_SIZE
        + 2
        + DEFAULT_MAIL_USERNAME_MAX_SIZE
        + DEFAULT_MAIL_PASSWORD_MAX_SIZE
        + DEFAULT_MAIL_FROM_MAX_SIZE
        + DEFAULT_MAIL_FROM_NAME_MAX_SIZE
        + DEFAULT_MAIL_TO_MAX_SIZE
        + DEFAULT_MAIL_SUBJECT_MAX_SIZE
        + 2;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        w.put_bytes(&self.sending_domain);
        w.put_bytes(&self.mail_host);
        w.put_u16(self.mail_port);
        w.put_bytes(&self.mail_username);
        w.put_bytes(&self.mail_password);
        w.put_bytes(&self.mail_from);
        w.put_bytes(&self.mail_from_name);
        w.put_bytes(&self.mail_to);
        w.put_bytes(&self.mail_subject);
        w.put_u16(self.mail_frequency);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        Self {
            sending_domain: r.get_array(),
            mail_host: r.get_array(),
            mail_port: r.get_u16(),
            mail_username: r.get_array(),
            mail_password: r.get_array(),
            mail_from: r.get_array(),
            mail_from_name: r.get_array(),
            mail_to: r.get_array(),
            mail_subject: r.get_array(),
            mail_frequency: r.get_u16(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let email = EmailConfig::default();
        assert_eq!(email.mail_port, 2525);
        assert_eq!(email.mail_frequency, 300);
        assert_eq!(email.mail_subject(), "device status");
        assert_eq!(email.mail_host(), "");
    }

    #[test]
    fn test_set_server_and_addresses() {
        let mut email = EmailConfig::default();
        email.set_server("smtp.example.com", 587, "mailer", "pw").unwrap();
        email.set_addresses("dev@example.com", "device", "ops@example.com").unwrap();

        let mut buf = [0u8; EmailConfig::SIZE];
        email.encode(&mut buf);
        let decoded = EmailConfig::decode(&buf);
        assert_eq!(decoded.mail_host(), "smtp.example.com");
        assert_eq!(decoded.mail_port, 587);
        assert_eq!(decoded.mail_from_name(), "device");
        assert_eq!(decoded.mail_to(), "ops@example.com");
        assert_eq!(decoded.mail_frequency, 300);
    }
}
