//! HTTP/1.1 subset: request parsing, typed headers, response writing.
//!
//! # Data Flow
//! ```text
//! raw buffer
//!     → request.rs (request line + header block + body)
//!     → headers.rs (typed values: Text | Number | List)
//!     → dispatch (routing crate module)
//!     → response.rs (status line + fixed-order headers + body)
//! ```

pub mod headers;
pub mod method;
pub mod request;
pub mod response;

pub use headers::{HeaderValue, HeaderValueError, Headers};
pub use method::Method;
pub use request::Request;
pub use response::Response;
