//! Read `.env` files into a plain key/value map.
//!
//! [`load_env_file`] and [`load_dotenv_from_root`] are the usual entry points.
//! A missing file yields an empty [`EnvMap`]; any other I/O failure is
//! returned to the caller. Nothing here touches the process environment, so
//! applying the map is up to the caller.
//!
//! ```no_run
//! let vars = dotenvmap::load_dotenv_from_root(".")?;
//! if let Some(url) = vars.get("DATABASE_URL") {
//!     println!("database: {url}");
//! }
//! # Ok::<(), dotenvmap::Error>(())
//! ```

mod error;
mod loader;
mod model;
mod parser;

pub use error::Error;
pub use loader::{
    DOTENV_FILENAME, EnvLoader, load_dotenv_from_root, load_env_file, read_env_file,
};
pub use model::{Encoding, Entry, EnvMap, LoadReport};
pub use parser::{parse_bytes, parse_entries, parse_reader, parse_str};
