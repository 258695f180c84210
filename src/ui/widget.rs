use crate::{
    core::{carousel::Carousel, config::CarouselOptions},
    input::events::{PointerEvent, PointerPhase},
    platform::{
        features::Features,
        memory::{ElementId, MemoryHost},
    },
};
use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2, Widget};
use instant::Instant;

const PALETTE: [Color32; 6] = [
    Color32::from_rgb(0x4e, 0x79, 0xa7),
    Color32::from_rgb(0xf2, 0x8e, 0x2b),
    Color32::from_rgb(0xe1, 0x57, 0x59),
    Color32::from_rgb(0x76, 0xb7, 0xb2),
    Color32::from_rgb(0x59, 0xa1, 0x4f),
    Color32::from_rgb(0xb0, 0x7a, 0xa1),
];

/// Initial layout width, replaced on the first frame
const INITIAL_WIDTH: f64 = 400.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselWidgetConfig {
    pub height: f32,
    pub show_arrows: bool,
    pub show_dots: bool,
    pub background_color: Color32,
    pub active_stroke: Stroke,
}

impl Default for CarouselWidgetConfig {
    fn default() -> Self {
        Self {
            height: 240.0,
            show_arrows: true,
            show_dots: true,
            background_color: Color32::from_rgb(230, 230, 230),
            active_stroke: Stroke::new(3.0, Color32::WHITE),
        }
    }
}

/// Retained carousel widget.
///
/// Owns a [`Carousel`] over an in-memory slide tree, drives its virtual
/// clock with real frame time and paints the strip (clones included), so
/// the same engine that runs in the browser runs here.
///
/// ```rust,ignore
/// let mut slides = CarouselWidget::with_labels(["One", "Two", "Three"], CarouselOptions::default());
/// ui.carousel(&mut slides);
/// ```
pub struct CarouselWidget {
    carousel: Carousel<MemoryHost>,
    labels: Vec<String>,
    config: CarouselWidgetConfig,
    last_frame: Option<Instant>,
    last_width: Option<f32>,
}

impl CarouselWidget {
    /// `count` placeholder slides labelled "Slide 1", "Slide 2", ...
    pub fn new(count: usize, options: CarouselOptions) -> Self {
        let labels = (1..=count).map(|index| format!("Slide {}", index)).collect();
        Self::with_labels(labels, options)
    }

    pub fn with_labels<I, S>(labels: I, options: CarouselOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        Self {
            carousel: Self::mount(&labels, options),
            labels,
            config: CarouselWidgetConfig::default(),
            last_frame: None,
            last_width: None,
        }
    }

    pub fn with_config(mut self, config: CarouselWidgetConfig) -> Self {
        self.config = config;
        self
    }

    fn mount(labels: &[String], options: CarouselOptions) -> Carousel<MemoryHost> {
        let (mut host, container) = MemoryHost::with_slides(labels.len(), INITIAL_WIDTH);
        if let Some(list) = host.children(container).first().copied() {
            let slides = host.children(list).to_vec();
            for (slide, label) in slides.into_iter().zip(labels) {
                host.set_text(slide, label.clone());
            }
        }
        Carousel::new(host, container, options, Features::mouse())
    }

    /// Tear down the current carousel and mount a fresh one with `options`
    pub fn rebuild(&mut self, options: CarouselOptions) {
        self.carousel.destroy();
        self.carousel = Self::mount(&self.labels, options);
        self.last_width = None;
        self.last_frame = None;
    }

    pub fn carousel(&self) -> &Carousel<MemoryHost> {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel<MemoryHost> {
        &mut self.carousel
    }

    pub fn config_mut(&mut self) -> &mut CarouselWidgetConfig {
        &mut self.config
    }

    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let dots_height = if self.config.show_dots { 20.0 } else { 0.0 };
        let desired = Vec2::new(ui.available_width(), self.config.height + dots_height);
        let (outer, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());
        let strip = Rect::from_min_size(outer.min, Vec2::new(outer.width(), self.config.height));

        self.tick();
        self.sync_width(strip.width());
        self.handle_input(&response);
        self.paint(ui, strip);

        if self.config.show_arrows {
            self.arrows(ui, strip);
        }
        if self.config.show_dots {
            let dots = Rect::from_min_max(Pos2::new(outer.min.x, strip.max.y), outer.max);
            self.dots(ui, dots);
        }

        if self.is_busy() {
            ui.ctx().request_repaint();
        }
        response
    }

    fn tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_frame {
            let elapsed_ms = now.duration_since(last).as_secs_f64() * 1000.0;
            self.carousel.advance(elapsed_ms);
        }
        self.last_frame = Some(now);
    }

    fn is_busy(&self) -> bool {
        let host = self.carousel.host();
        self.carousel.is_sliding() || host.pending_timers() > 0 || host.pending_frames() > 0
    }

    fn strip_children(&self) -> Vec<ElementId> {
        self.carousel
            .slide_wrap()
            .map(|wrap| self.carousel.host().children(*wrap).to_vec())
            .unwrap_or_default()
    }

    /// Resize every slide to the strip and report the new window width
    fn sync_width(&mut self, width: f32) {
        if self.last_width == Some(width) {
            return;
        }
        let first_layout = self.last_width.is_none();
        self.last_width = Some(width);

        let display = self.carousel.options().display.max(1) as f64;
        let slide_width = width as f64 / display;
        for child in self.strip_children() {
            self.carousel.host_mut().set_width(child, slide_width);
        }

        if first_layout {
            // the mount width may already match the strip, so skip the resize path
            self.carousel.host_mut().set_viewport_width(width as f64);
            self.carousel.refresh_layout();
        } else {
            self.carousel.resize_viewport(width as f64);
        }
    }

    fn handle_input(&mut self, response: &Response) {
        let position = response.interact_pointer_pos();

        if response.drag_started() {
            if let Some(pos) = position {
                let event = PointerEvent::mouse(PointerPhase::Start, pos.x as f64, pos.y as f64);
                self.carousel.dispatch_pointer(&event, None);
            }
        }
        if response.dragged() {
            if let Some(pos) = position {
                let event = PointerEvent::mouse(PointerPhase::Move, pos.x as f64, pos.y as f64);
                self.carousel.dispatch_pointer(&event, None);
            }
        }
        if response.drag_released() {
            let pos = position.unwrap_or_default();
            let event = PointerEvent::mouse(PointerPhase::End, pos.x as f64, pos.y as f64);
            self.carousel.dispatch_pointer(&event, None);
        }
        if response.clicked() {
            self.carousel.dispatch_click();
        }
    }

    fn paint(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.config.background_color);

        if let Some(err) = self.carousel.init_error() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                err.to_string(),
                FontId::proportional(14.0),
                Color32::from_rgb(150, 0, 0),
            );
            return;
        }

        let host = self.carousel.host();
        let offset = self
            .carousel
            .slide_wrap()
            .and_then(|wrap| host.translate_x(*wrap))
            .unwrap_or(0.0) as f32;
        let slide_width = self.carousel.slide_width() as f32;
        let active_class = &self.carousel.options().active_class;

        for (position, child) in self.strip_children().into_iter().enumerate() {
            let left = rect.min.x + offset + position as f32 * slide_width;
            let slide_rect = Rect::from_min_size(
                Pos2::new(left, rect.min.y),
                Vec2::new(slide_width, rect.height()),
            );
            if !slide_rect.intersects(rect) {
                continue;
            }

            let index = host
                .attribute(child, "data-index")
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(position);
            let fill = PALETTE[index % PALETTE.len()];
            painter.rect_filled(slide_rect.shrink(2.0), 4.0, fill);
            painter.text(
                slide_rect.center(),
                Align2::CENTER_CENTER,
                host.text(child),
                FontId::proportional(20.0),
                Color32::WHITE,
            );
            if host.has_class(child, active_class) {
                painter.rect_stroke(slide_rect.shrink(3.0), 4.0, self.config.active_stroke);
            }
        }
    }

    fn arrows(&mut self, ui: &mut Ui, rect: Rect) {
        let size = Vec2::new(28.0, 28.0);
        let prev = Rect::from_center_size(Pos2::new(rect.min.x + 22.0, rect.center().y), size);
        let next = Rect::from_center_size(Pos2::new(rect.max.x - 22.0, rect.center().y), size);

        if ui.put(prev, egui::Button::new("‹")).clicked() {
            self.carousel.prev();
        }
        if ui.put(next, egui::Button::new("›")).clicked() {
            self.carousel.next();
        }
    }

    fn dots(&mut self, ui: &mut Ui, rect: Rect) {
        let count = self.carousel.slide_count();
        if count == 0 {
            return;
        }
        let spacing = 14.0;
        let start = rect.center().x - spacing * (count as f32 - 1.0) / 2.0;

        for index in 0..count {
            let center = Pos2::new(start + spacing * index as f32, rect.center().y);
            let dot = Rect::from_center_size(center, Vec2::splat(10.0));
            let response = ui.interact(dot, ui.id().with(("slidelet_dot", index)), Sense::click());

            let color = if index == self.carousel.current_index() {
                Color32::from_gray(60)
            } else {
                Color32::from_gray(170)
            };
            ui.painter().circle_filled(center, 4.0, color);

            if response.clicked() {
                self.carousel.go(index as isize);
            }
        }
    }
}

impl Widget for &mut CarouselWidget {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui)
    }
}
