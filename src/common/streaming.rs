use serde::{Deserialize, Serialize};

/// 流式处理配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StreamingConfig {
    /// 用于流式处理的缓冲区大小
    pub buffer_size: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            buffer_size: 65536, // 64KB
        }
    }
}

impl StreamingConfig {
    /// 设置缓冲区大小
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}
