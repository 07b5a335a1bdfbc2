pub mod codec;
pub mod definition;
pub mod operator;
pub mod validation;
pub mod value;

pub use codec::*;
pub use definition::*;
pub use operator::*;
pub use validation::*;
pub use value::*;
