//! Fixed user-facing reply texts. Stable so callers and tests can match them.

use crate::evaluator::Number;

pub const MODEL_LOADING: &str = "抱歉，AI模型正在加载中，请稍后重试。";
pub const NO_VALID_REPLY: &str = "抱歉，AI没有生成有效回复。";
pub const CANNOT_CONNECT: &str = "无法连接到Ollama服务，请确保Ollama正在运行。";
pub const TIMED_OUT: &str = "请求超时，请稍后重试。";
pub const PROCESSING_ERROR: &str = "抱歉，处理您的请求时发生错误。";

#[must_use]
pub fn computed_answer(value: Number) -> String {
    format!("答案：{value}")
}

#[must_use]
pub fn computation_error(reason: &str) -> String {
    format!("数学计算出错：{reason}")
}

#[must_use]
pub fn service_unavailable(status: u16) -> String {
    format!("抱歉，AI服务暂时不可用。错误代码: {status}")
}
