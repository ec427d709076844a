pub mod animation;
pub mod query;

/// 從 World 取出 resource，若缺少則回傳 DataError::ResourceNotFound
macro_rules! take_resource {
    ($world:expr, $resource:ty) => {
        $world.remove_resource::<$resource>().ok_or_else(|| {
            crate::error::DataError::ResourceNotFound {
                resource_name: stringify!($resource).to_string(),
            }
        })?
    };
}

pub(super) use take_resource;
