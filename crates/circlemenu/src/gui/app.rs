use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::menu::{self, DragTracker, Menu, MenuIcon};
use crate::gui::theme;
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use sectorwheel::rotation::MenuAction;
use sectorwheel::{ItemId, Point};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub menu: Rc<RefCell<Menu>>,
    pub visible: bool,
    pub drawing_area: gtk::DrawingArea,
    tracker: DragTracker,
    tick: Option<gtk::TickCallbackId>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Rotate(i32),
    Select(ItemId),
    ConfigReload,
    Resize(i32, i32),
    DragBegin(Point),
    DragUpdate(f64, f64),
    DragEnd(f64, f64),
    Swipe(f64, f64),
    Tick,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Rotate(angle) => AppMsg::Rotate(angle),
            AppEvent::Select(id) => AppMsg::Select(id),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Circle Menu"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "circlemenu-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_content_width: size,
                set_content_height: size,
                add_css_class: "circlemenu-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;
        let size = config.size;

        theme::load_css();
        window::init_layer_shell(&root);

        let model = AppModel {
            menu: Rc::new(RefCell::new(Menu::from_config(&config))),
            visible: !config.start_hidden,
            drawing_area: gtk::DrawingArea::default(),
            tracker: DragTracker::default(),
            tick: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        attach_gestures(&model.drawing_area, &sender);

        let menu_draw = model.menu.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = menu::draw(cr, &menu_draw.borrow()) {
                log::error!("Drawing error: {}", e);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let now = Instant::now();
        let action = match msg {
            AppMsg::Show => {
                self.visible = true;
                MenuAction::new(true, self.menu.borrow().wheel.is_animating())
            }
            AppMsg::Hide => {
                self.visible = false;
                MenuAction::new(false, self.menu.borrow().wheel.is_animating())
            }
            AppMsg::Rotate(angle) => self.menu.borrow_mut().wheel.set_rotation(angle),
            AppMsg::Select(id) => self
                .menu
                .borrow_mut()
                .wheel
                .select(id, now)
                .unwrap_or_else(|e| {
                    log::warn!("Cannot select sector {}: {}", id, e);
                    MenuAction::default()
                }),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let icons = new_config.items.iter().map(MenuIcon::from_config).collect();
                    log::info!("Configuration reloaded");
                    self.menu.borrow_mut().reload(&new_config, icons)
                }
                Err(e) => {
                    log::error!("Failed to reload config: {}", e);
                    MenuAction::default()
                }
            },
            AppMsg::Resize(width, height) => self
                .menu
                .borrow_mut()
                .resize(width as f64, height as f64),
            AppMsg::DragBegin(origin) => {
                let event = self.tracker.begin(origin);
                self.menu.borrow_mut().wheel.handle(event, now)
            }
            AppMsg::DragUpdate(x, y) => match self.tracker.update(x, y) {
                Some(event) => self.menu.borrow_mut().wheel.handle(event, now),
                None => MenuAction::default(),
            },
            AppMsg::DragEnd(x, y) => {
                let event = self.tracker.end(x, y);
                self.menu.borrow_mut().wheel.handle(event, now)
            }
            AppMsg::Swipe(vx, vy) => match self.tracker.swipe(vx, vy) {
                Some(event) => self.menu.borrow_mut().wheel.handle(event, now),
                None => MenuAction::default(),
            },
            AppMsg::Tick => self.menu.borrow_mut().wheel.tick(now),
        };

        self.apply(action, &sender);
    }
}

impl AppModel {
    fn apply(&mut self, action: MenuAction, sender: &ComponentSender<Self>) {
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }

        if !action.needs_ticks && !self.menu.borrow().wheel.is_animating() {
            if let Some(tick) = self.tick.take() {
                tick.remove();
            }
        } else if self.tick.is_none() {
            let sender = sender.clone();
            self.tick = Some(self.drawing_area.add_tick_callback(move |_, _| {
                sender.input(AppMsg::Tick);
                glib::ControlFlow::Continue
            }));
        }
    }
}

/// Drag and swipe share one gesture group so both see every press.
fn attach_gestures(area: &gtk::DrawingArea, sender: &ComponentSender<AppModel>) {
    let drag = gtk::GestureDrag::new();

    let s = sender.clone();
    drag.connect_drag_begin(move |_, x, y| s.input(AppMsg::DragBegin(Point::new(x, y))));
    let s = sender.clone();
    drag.connect_drag_update(move |_, x, y| s.input(AppMsg::DragUpdate(x, y)));
    let s = sender.clone();
    drag.connect_drag_end(move |_, x, y| s.input(AppMsg::DragEnd(x, y)));

    let swipe = gtk::GestureSwipe::new();
    let s = sender.clone();
    swipe.connect_swipe(move |_, vx, vy| s.input(AppMsg::Swipe(vx, vy)));
    swipe.group_with(&drag);

    area.add_controller(drag);
    area.add_controller(swipe);
}
