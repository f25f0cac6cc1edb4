//! Login credential table (web configuration UI)

use crate::database::{set_text, text, Record, RecordReader, RecordWriter, TextTooLong};

/// Username/password field size
pub const LOGIN_CONFIGS_BUF_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginCredential {
    pub username: [u8; LOGIN_CONFIGS_BUF_SIZE],
    pub password: [u8; LOGIN_CONFIGS_BUF_SIZE],
}

impl LoginCredential {
    pub fn new(username: &str, password: &str) -> Result<Self, TextTooLong> {
        let mut login = Self::default();
        login.set_username(username)?;
        login.set_password(password)?;
        Ok(login)
    }

    pub fn username(&self) -> &str {
        text(&self.username)
    }

    pub fn password(&self) -> &str {
        text(&self.password)
    }

    pub fn set_username(&mut self, value: &str) -> Result<(), TextTooLong> {
        set_text(&mut self.username, value)
    }

    pub fn set_password(&mut self, value: &str) -> Result<(), TextTooLong> {
        set_text(&mut self.password, value)
    }
}

impl Default for LoginCredential {
    fn default() -> Self {
        Self {
            username: [0; LOGIN_CONFIGS_BUF_SIZE],
            password: [0; LOGIN_CONFIGS_BUF_SIZE],
        }
    }
}

impl Record for LoginCredential {
    const SIZE: usize = 2 * LOGIN_CONFIGS_BUF_SIZE;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        w.put_bytes(&self.username);
        w.put_bytes(&self.password);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        Self {
            username: r.get_array(),
            password: r.get_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_accessors() {
        let login = LoginCredential::new("admin", "secret").unwrap();
        assert_eq!(login.username(), "admin");
        assert_eq!(login.password(), "secret");
    }

    #[test]
    fn test_overlong_rejected() {
        let long = [b'x'; LOGIN_CONFIGS_BUF_SIZE + 1];
        let long = core::str::from_utf8(&long).unwrap();
        assert_eq!(LoginCredential::new(long, "p"), Err(TextTooLong));
    }

    #[test]
    fn test_password_follows_username() {
        let login = LoginCredential::new("u", "p").unwrap();
        let mut buf = [0u8; LoginCredential::SIZE];
        login.encode(&mut buf);
        assert_eq!(buf[0], b'u');
        assert_eq!(buf[LOGIN_CONFIGS_BUF_SIZE], b'p');
    }
}
