use crate::collision::Aabb;
use crate::config::GameConfig;
use crate::input::InputEvent;

#[derive(Clone, Debug)]
pub struct TitleScreen {
    timer: u32,
    duration: u32,
    title_rect: Aabb,
}

impl TitleScreen {
    pub fn new(config: &GameConfig) -> Self {
        let left = ((config.screen_width - config.title_width) / 2.0).floor();
        let top = ((config.screen_height - config.title_height) / 2.0).floor();
        Self {
            timer: config.title_screen_duration,
            duration: config.title_screen_duration,
            title_rect: Aabb {
                left,
                top,
                width: config.title_width,
                height: config.title_height,
            },
        }
    }

    pub fn title_rect(&self) -> Aabb {
        self.title_rect
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// True when a click landed inside the title region.
    pub fn handle_events(&self, events: &[InputEvent]) -> bool {
        events.iter().any(|event| match event {
            InputEvent::MouseDown { x, y } => self.title_rect.contains_point(*x, *y),
            _ => false,
        })
    }

    /// Cosmetic countdown that reloads when it runs out.
    pub fn update(&mut self) {
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.timer = self.duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_is_centred() {
        let title = TitleScreen::new(&GameConfig::default());
        let rect = title.title_rect();
        assert_eq!((rect.left, rect.top), (200.0, 200.0));
        assert_eq!(rect.center(), (400.0, 300.0));
    }

    #[test]
    fn only_clicks_inside_region_start() {
        let title = TitleScreen::new(&GameConfig::default());
        assert!(title.handle_events(&[InputEvent::MouseDown { x: 400.0, y: 300.0 }]));
        assert!(!title.handle_events(&[InputEvent::MouseDown { x: 10.0, y: 10.0 }]));
        assert!(!title.handle_events(&[InputEvent::Quit]));
        assert!(!title.handle_events(&[]));
    }

    #[test]
    fn timer_reloads_at_zero() {
        let mut config = GameConfig::default();
        config.title_screen_duration = 3;
        let mut title = TitleScreen::new(&config);
        title.update();
        title.update();
        assert_eq!(title.timer(), 1);
        title.update();
        assert_eq!(title.timer(), 3);
    }
}
