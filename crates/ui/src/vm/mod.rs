mod page_vm;

pub use page_vm::{ChoiceVm, PageVm, ProgressVm, SectionVm, ThemeDotVm, map_page};
