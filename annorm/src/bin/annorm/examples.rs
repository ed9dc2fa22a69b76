use crate::commands::{entities, set};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "entities",
            groups: entities::EXAMPLES,
        },
        CommandExample {
            name: "set",
            groups: set::EXAMPLES,
        },
    ]
}
