use cairo::Context;
use gtk::gdk;
use gtk4 as gtk;
use palette::Srgba;

pub fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.circlemenu-window, .circlemenu-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
