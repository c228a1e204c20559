use gtk4 as gtk;
use gtk4_layer_shell::{Layer, LayerShell};

/// An overlay surface with no anchors, so the compositor centers it.
pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("circlemenu"));
    window.set_exclusive_zone(-1);
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
}
