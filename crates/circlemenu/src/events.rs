use sectorwheel::ItemId;
use sectorwheel::control::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Rotate(i32),
    Select(ItemId),
    ConfigReload,
}

impl From<ControlCommand> for AppEvent {
    fn from(command: ControlCommand) -> Self {
        match command {
            ControlCommand::Show => AppEvent::Show,
            ControlCommand::Hide => AppEvent::Hide,
            ControlCommand::Rotate(angle) => AppEvent::Rotate(angle),
            ControlCommand::Select(id) => AppEvent::Select(id),
        }
    }
}
