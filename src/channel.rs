use std::fmt;

use crate::prelude::Result;
use crate::Error;

/// Width of the on-chain channel identifier.
pub const CHANNEL_ID_LEN: usize = 32;

/// Channel identifier as the port contract expects it: the UTF-8 bytes of the
/// channel name, right-padded with zeros to 32 bytes. Names may not contain
/// NUL, which is reserved for the padding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId([u8; CHANNEL_ID_LEN]);

impl ChannelId {
    pub fn encode(channel: &str) -> Result<Self> {
        let raw = channel.as_bytes();
        if raw.len() > CHANNEL_ID_LEN {
            return Err(Error::Encoding(format!(
                "channel id {channel:?} is {} bytes, at most {CHANNEL_ID_LEN} fit in bytes32",
                raw.len()
            )));
        }
        if raw.contains(&0) {
            return Err(Error::Encoding(format!(
                "channel id {channel:?} contains a NUL byte"
            )));
        }

        let mut bytes = [0u8; CHANNEL_ID_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(ChannelId(bytes))
    }

    /// Recovers the channel name, dropping the zero padding.
    pub fn decode(&self) -> Result<String> {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        String::from_utf8(self.0[..end].to_vec())
            .map_err(|e| Error::Encoding(format!("channel id is not valid utf-8: {e}")))
    }

    pub fn as_bytes(&self) -> &[u8; CHANNEL_ID_LEN] {
        &self.0
    }
}

impl From<ChannelId> for [u8; CHANNEL_ID_LEN] {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok(name) => write!(f, "ChannelId({name:?})"),
            Err(_) => write!(f, "ChannelId(0x{})", hex::encode(self.0)),
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
