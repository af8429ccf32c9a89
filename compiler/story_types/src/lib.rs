//! Types and call-signature checking for stories.
//!
//! Stories are dynamically typed except at call boundaries: every call to a
//! declared function or a registered mutation is checked against its
//! [`Signature`]. Argument names must match exactly and every supplied
//! type must implicitly cast to the declared one.
//!
//! # Implicit casts
//!
//! | from            | to              |
//! |-----------------|-----------------|
//! | `T`             | `T`             |
//! | any type        | `any`           |
//! | `any`, `none`   | any type        |
//! | `int`           | `float`         |
//! | `List[A]`       | `List[B]` if `A` casts to `B` |
//! | `Map[K,A]`      | `Map[L,B]` if `K` casts to `L` and `A` to `B` |

mod env;
mod signature;
mod table;
mod ty;

pub use env::TypeEnv;
pub use signature::{CallArgs, FnKind, Signature};
pub use table::FunctionTable;
pub use ty::Type;
