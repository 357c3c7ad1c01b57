//! Tool Router - registers resolved descriptors with the rmcp ToolRouter.

use std::collections::HashSet;

use rmcp::handler::server::tool::ToolRouter;

use super::descriptor::ToolDescriptor;
use super::error::ToolError;

/// Register each descriptor with `router`.
///
/// rmcp replaces routes with the same name silently, so a clash is checked
/// here and reported as [`ToolError::DuplicateId`]. Every id is checked
/// before the first route is added; on error the router is left unchanged.
pub fn register_routes<'a, S>(
    router: &mut ToolRouter<S>,
    descriptors: impl IntoIterator<Item = &'a ToolDescriptor>,
) -> Result<Vec<&'static str>, ToolError>
where
    S: Send + Sync + 'static,
{
    let descriptors: Vec<&ToolDescriptor> = descriptors.into_iter().collect();

    let mut seen = HashSet::new();
    for descriptor in &descriptors {
        if router.has_route(descriptor.id()) || !seen.insert(descriptor.id()) {
            return Err(ToolError::duplicate_id(descriptor.id()));
        }
    }

    for descriptor in &descriptors {
        router.add_route(descriptor.to_route());
    }
    Ok(descriptors.iter().map(|d| d.id()).collect())
}
