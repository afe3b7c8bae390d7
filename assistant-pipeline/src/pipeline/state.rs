use state_machines::state_machine;

state_machine! {
    name: ChatTurnMachine,
    state: ChatTurnState,
    initial: Ready,
    states: [Ready, EntitiesMatched, Retrieved, Completed, Validated],
    events {
        match_entities { transition: { from: Ready, to: EntitiesMatched } }
        retrieve { transition: { from: EntitiesMatched, to: Retrieved } }
        complete { transition: { from: Retrieved, to: Completed } }
        validate { transition: { from: Completed, to: Validated } }
    }
}

pub fn ready() -> ChatTurnMachine<(), Ready> {
    ChatTurnMachine::new(())
}
