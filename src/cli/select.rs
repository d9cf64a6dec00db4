use super::ui;
use crate::selection::SelectionStore;

#[derive(Debug, Clone)]
pub enum SelectCommand {
    List,
    Add(Vec<String>),
    Remove(Vec<String>),
    Toggle(Vec<String>),
    Set(Vec<String>),
    Clear,
}

/// Applies `command` to the selection.
pub fn apply(selection: &mut SelectionStore, command: SelectCommand) {
    match command {
        SelectCommand::List => {}
        SelectCommand::Add(codes) => codes.iter().for_each(|c| selection.add(c)),
        SelectCommand::Remove(codes) => codes.iter().for_each(|c| selection.remove(c)),
        SelectCommand::Toggle(codes) => codes.iter().for_each(|c| selection.toggle(c)),
        SelectCommand::Set(codes) => selection.set_all(codes),
        SelectCommand::Clear => selection.clear(),
    }
}

pub fn run(selection: &mut SelectionStore, command: SelectCommand) {
    apply(selection, command);

    if selection.codes().is_empty() {
        println!("{}", ui::style_text("No currencies selected", ui::StyleType::Subtle));
    } else {
        println!(
            "{} {}",
            ui::style_text("Selected:", ui::StyleType::Title),
            selection.codes().join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStorage;
    use std::sync::Arc;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_apply_commands() {
        let mut selection = SelectionStore::new(Arc::new(MemoryStorage::new()));

        apply(&mut selection, SelectCommand::Add(codes(&["USD", "EUR", "USD"])));
        assert_eq!(selection.codes(), ["USD", "EUR"]);

        apply(&mut selection, SelectCommand::Toggle(codes(&["EUR", "INR"])));
        assert_eq!(selection.codes(), ["USD", "INR"]);

        apply(&mut selection, SelectCommand::Remove(codes(&["USD"])));
        assert_eq!(selection.codes(), ["INR"]);

        apply(&mut selection, SelectCommand::Set(codes(&["GBP", "GBP"])));
        assert_eq!(selection.codes(), ["GBP", "GBP"]);

        apply(&mut selection, SelectCommand::List);
        assert_eq!(selection.codes(), ["GBP", "GBP"]);

        apply(&mut selection, SelectCommand::Clear);
        assert!(selection.codes().is_empty());
    }
}
