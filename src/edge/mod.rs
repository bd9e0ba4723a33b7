/*
 * Responsibility
 * - edge (viewer-request) のワイヤ型
 * - request / response / event envelope の serde 定義
 */
pub mod event;
pub mod request;
pub mod response;

pub use event::{EdgeEvent, EventError, HandlerOutput};
pub use request::{EdgeRequest, HeaderEntry, Headers};
pub use response::EdgeResponse;
