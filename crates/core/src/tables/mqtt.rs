//! MQTT messaging tables: broker connection, last will, publish/subscribe

use crate::database::{set_text, text, Record, RecordReader, RecordWriter, TextTooLong};

pub const MQTT_HOST_BUF_SIZE: usize = 50;
pub const MQTT_CLIENT_ID_BUF_SIZE: usize = 100;
pub const MQTT_USERNAME_BUF_SIZE: usize = 25;
pub const MQTT_PASSWORD_BUF_SIZE: usize = 500;
pub const MQTT_TOPIC_BUF_SIZE: usize = MQTT_HOST_BUF_SIZE;
pub const MQTT_WILL_MSG_BUF_SIZE: usize = 80;
pub const MQTT_MAX_PUBLISH_TOPIC: usize = 2;
pub const MQTT_MAX_SUBSCRIBE_TOPIC: usize = MQTT_MAX_PUBLISH_TOPIC;
pub const MQTT_MAX_QOS_LEVEL: u8 = 2;

pub const MQTT_DEFAULT_PORT: i32 = 1883;
/// Seconds
pub const MQTT_DEFAULT_KEEPALIVE: i32 = 30;

/// Broker connection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MqttGeneralConfig {
    pub host: [u8; MQTT_HOST_BUF_SIZE],
    pub port: i32,
    pub security: i32,
    pub client_id: [u8; MQTT_CLIENT_ID_BUF_SIZE],
    pub username: [u8; MQTT_USERNAME_BUF_SIZE],
    pub password: [u8; MQTT_PASSWORD_BUF_SIZE],
    pub keepalive: i32,
    pub clean_session: i32,
}

impl MqttGeneralConfig {
    pub fn host(&self) -> &str {
        text(&self.host)
    }

    pub fn client_id(&self) -> &str {
        text(&self.client_id)
    }

    pub fn username(&self) -> &str {
        text(&self.username)
    }

    pub fn password(&self) -> &str {
        text(&self.password)
    }

    pub fn set_host(&mut self, value: &str) -> Result<(), TextTooLong> {
        set_text(&mut self.host, value)
    }

    pub fn set_client_id(&mut self, value: &str) -> Result<(), TextTooLong> {
        set_text(&mut self.client_id, value)
    }

    pub fn set_credentials(&mut self, username: &str, password: &str) -> Result<(), TextTooLong> {
        if username.len() > MQTT_USERNAME_BUF_SIZE || password.len() > MQTT_PASSWORD_BUF_SIZE {
            return Err(TextTooLong);
        }
        set_text(&mut self.username, username)?;
        set_text(&mut self.password, password)
    }
}

impl Default for MqttGeneralConfig {
    fn default() -> Self {
        Self {
            host: [0; MQTT_HOST_BUF_SIZE],
            port: MQTT_DEFAULT_PORT,
            security: 0,
            client_id: [0; MQTT_CLIENT_ID_BUF_SIZE],
            username: [0; MQTT_USERNAME_BUF_SIZE],
            password: [0; MQTT_PASSWORD_BUF_SIZE],
            keepalive: MQTT_DEFAULT_KEEPALIVE,
            clean_session: 1,
        }
    }
}

impl Record for MqttGeneralConfig {
    const SIZE: usize = MQTT_HOST_BUF_SIZE
        + 4
        + 4
        + MQTT_CLIENT_ID_BUF_SIZE
        + MQTT_USERNAME_BUF_SIZE
        + MQTT_PASSWORD_BUF_SIZE
        + 4
        + 4;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        w.put_bytes(&self.host);
        w.put_i32(self.port);
        w.put_i32(self.security);
        w.put_bytes(&self.client_id);
        w.put_bytes(&self.username);
        w.put_bytes(&self.password);
        w.put_i32(self.keepalive);
        w.put_i32(self.clean_session);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        Self {
            host: r.get_array(),
            port: r.get_i32(),
            security: r.get_i32(),
            client_id: r.get_array(),
            username: r.get_array(),
            password: r.get_array(),
            keepalive: r.get_i32(),
            clean_session: r.get_i32(),
        }
    }
}

/// Last-will-and-testament settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MqttLwtConfig {
    pub will_topic: [u8; MQTT_TOPIC_BUF_SIZE],
    pub will_message: [u8; MQTT_WILL_MSG_BUF_SIZE],
    pub will_qos: i32,
    pub will_retain: i32,
}

impl MqttLwtConfig {
    pub fn will_topic(&self) -> &str {
        text(&self.will_topic)
    }

    pub fn will_message(&self) -> &str {
        text(&self.will_message)
    }

    pub fn set_will(&mut self, topic: &str, message: &str) -> Result<(), TextTooLong> {
        if topic.len() > MQTT_TOPIC_BUF_SIZE || message.len() > MQTT_WILL_MSG_BUF_SIZE {
            return Err(TextTooLong);
        }
        set_text(&mut self.will_topic, topic)?;
        set_text(&mut self.will_message, message)
    }
}

impl Default for MqttLwtConfig {
    fn default() -> Self {
        Self {
            will_topic: [0; MQTT_TOPIC_BUF_SIZE],
            will_message: [0; MQTT_WILL_MSG_BUF_SIZE],
            will_qos: 0,
            will_retain: 0,
        }
    }
}

impl Record for MqttLwtConfig {
    const SIZE: usize = MQTT_TOPIC_BUF_SIZE + MQTT_WILL_MSG_BUF_SIZE + 4 + 4;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        w.put_bytes(&self.will_topic);
        w.put_bytes(&self.will_message);
        w.put_i32(self.will_qos);
        w.put_i32(self.will_retain);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        Self {
            will_topic: r.get_array(),
            will_message: r.get_array(),
            will_qos: r.get_i32(),
            will_retain: r.get_i32(),
        }
    }
}

/// One publish topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MqttPubTopic {
    pub topic: [u8; MQTT_TOPIC_BUF_SIZE],
    pub qos: u8,
    pub retain: u8,
}

impl MqttPubTopic {
    const SIZE: usize = MQTT_TOPIC_BUF_SIZE + 2;

    pub fn topic(&self) -> &str {
        text(&self.topic)
    }
}

impl Default for MqttPubTopic {
    fn default() -> Self {
        Self {
            topic: [0; MQTT_TOPIC_BUF_SIZE],
            qos: 0,
            retain: 0,
        }
    }
}

/// One subscribe topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MqttSubTopic {
    pub topic: [u8; MQTT_TOPIC_BUF_SIZE],
    pub qos: u8,
}

impl MqttSubTopic {
    const SIZE: usize = MQTT_TOPIC_BUF_SIZE + 1;

    pub fn topic(&self) -> &str {
        text(&self.topic)
    }
}

impl Default for MqttSubTopic {
    fn default() -> Self {
        Self {
            topic: [0; MQTT_TOPIC_BUF_SIZE],
            qos: 0,
        }
    }
}

/// Rejected publish/subscribe slot update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicError {
    /// Slot index past the topic list
    SlotOutOfRange,
    /// QoS above `MQTT_MAX_QOS_LEVEL`
    InvalidQos,
    /// Topic does not fit its field
    TopicTooLong,
}

impl From<TextTooLong> for TopicError {
    fn from(_: TextTooLong) -> Self {
        TopicError::TopicTooLong
    }
}

/// Publish/subscribe topic lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MqttPubSubConfig {
    pub publish_topics: [MqttPubTopic; MQTT_MAX_PUBLISH_TOPIC],
    pub subscribe_topics: [MqttSubTopic; MQTT_MAX_SUBSCRIBE_TOPIC],
    /// Seconds between publishes (0 = disabled)
    pub publish_frequency: i32,
}

impl MqttPubSubConfig {
    /// Set publish slot `index`
    pub fn set_publish(
        &mut self,
        index: usize,
        topic: &str,
        qos: u8,
        retain: bool,
    ) -> Result<(), TopicError> {
        let Some(slot) = self.publish_topics.get_mut(index) else {
            return Err(TopicError::SlotOutOfRange);
        };
        if qos > MQTT_MAX_QOS_LEVEL {
            return Err(TopicError::InvalidQos);
        }
        set_text(&mut slot.topic, topic)?;
        slot.qos = qos;
        slot.retain = retain as u8;
        Ok(())
    }

    /// Set subscribe slot `index`
    pub fn set_subscribe(&mut self, index: usize, topic: &str, qos: u8) -> Result<(), TopicError> {
        let Some(slot) = self.subscribe_topics.get_mut(index) else {
            return Err(TopicError::SlotOutOfRange);
        };
        if qos > MQTT_MAX_QOS_LEVEL {
            return Err(TopicError::InvalidQos);
        }
        set_text(&mut slot.topic, topic)?;
        slot.qos = qos;
        Ok(())
    }
}

impl Record for MqttPubSubConfig {
    const SIZE: usize = MQTT_MAX_PUBLISH_TOPIC * MqttPubTopic::SIZE
        + MQTT_MAX_SUBSCRIBE_TOPIC * MqttSubTopic::SIZE
        + 4;

    fn encode(&self, buf: &mut [u8]) {
        let mut w = RecordWriter::new(buf);
        for publish in &self.publish_topics {
            w.put_bytes(&publish.topic);
            w.put_u8(publish.qos);
            w.put_u8(publish.retain);
        }
        for subscribe in &self.subscribe_topics {
            w.put_bytes(&subscribe.topic);
            w.put_u8(subscribe.qos);
        }
        w.put_i32(self.publish_frequency);
    }

    fn decode(buf: &[u8]) -> Self {
        let mut r = RecordReader::new(buf);
        let mut config = Self::default();
        for publish in config.publish_topics.iter_mut() {
            publish.topic = r.get_array();
            publish.qos = r.get_u8();
            publish.retain = r.get_u8();
        }
        for subscribe in config.subscribe_topics.iter_mut() {
            subscribe.topic = r.get_array();
            subscribe.qos = r.get_u8();
        }
        config.publish_frequency = r.get_i32();
        config
    }
}
