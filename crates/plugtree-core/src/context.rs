use crate::command_map::CommandMapEntry;
use crate::descriptor::PluginDescriptor;
use crate::types::ContextType;

/// Whether a plugin's commands take part in the current build.
///
/// A descriptor with no supported context types has no opinion and is always
/// active. Otherwise the active context type must be present and listed.
pub fn is_active(descriptor: &PluginDescriptor, active: Option<ContextType>) -> bool {
    gate(descriptor.supported_context_types.iter(), active)
}

/// Same rule applied to a single entry's `required_context_types`.
pub fn entry_is_active(entry: &CommandMapEntry, active: Option<ContextType>) -> bool {
    gate(entry.required_context_types().iter(), active)
}

fn gate<'a>(
    mut supported: impl ExactSizeIterator<Item = &'a ContextType>,
    active: Option<ContextType>,
) -> bool {
    if supported.len() == 0 {
        return true;
    }
    match active {
        Some(active) => supported.any(|c| *c == active),
        None => false,
    }
}
