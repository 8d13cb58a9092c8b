pub mod paths;

pub use paths::{
    DEFAULT_NAMESPACE_PREFIX, package_relative_dir, strip_namespace, validate_file_name,
    with_height_suffix,
};
