use recycler::{CellBinding, CellSource, CellView, Scroller, ScrollerOptions};
use recycler_adapter::{Controller, Easing, ScrollSurface, SimSurface, SnapConfig, SnapState};

struct Card {
    binding: Option<CellBinding>,
}

impl CellView for Card {
    type Kind = u8;

    fn kind(&self) -> u8 {
        0
    }

    fn binding(&self) -> Option<CellBinding> {
        self.binding
    }

    fn set_binding(&mut self, binding: Option<CellBinding>) {
        self.binding = binding;
    }
}

struct Deck;

impl CellSource for Deck {
    type View = Card;

    fn cell_count(&self) -> usize {
        12
    }

    fn cell_size(&self, _data_index: usize) -> f32 {
        280.0
    }

    fn cell_kind(&self, _data_index: usize) -> u8 {
        0
    }

    fn create_view(&mut self, _kind: &u8, binding: CellBinding) -> Card {
        Card {
            binding: Some(binding),
        }
    }
}

fn main() {
    // Example: a looping card carousel that snaps cards to the viewport center after a fling.
    //
    // An adapter would:
    // - forward drag begin/end and wheel events
    // - feed surface movement into the scroller (here: the simulated surface)
    // - call tick(now_ms) once per frame and render the scroller's views
    let mut scroller = Scroller::new(
        Deck,
        ScrollerOptions::horizontal(320.0)
            .with_spacing(16.0)
            .with_loop(true),
    );
    scroller.reload(0.0);

    let config = SnapConfig::new()
        .with_snap_on_end_drag(true)
        .with_alignment(recycler::Alignment::Center)
        .with_easing(Easing::EaseOutCubic)
        .with_duration_ms(240);
    let mut c = Controller::new(scroller, SimSurface::new(), config);

    // A fling.
    c.on_begin_drag();
    c.surface_mut().set_velocity(2_400.0);
    c.on_end_drag();

    let mut now_ms = 0u64;
    while now_ms < 5_000 {
        now_ms += 16;
        if c.snap_state() == SnapState::Settling {
            let dx = c.surface_mut().step(16);
            let p = c.scroller().scroll_position() + dx;
            c.set_scroll_position(p);
        }
        c.tick(now_ms);

        if now_ms % 160 == 0 {
            println!(
                "t={now_ms} state={:?} pos={:.1} v={:.1} first={}",
                c.snap_state(),
                c.scroller().scroll_position(),
                c.surface().velocity(),
                c.scroller().start_data_index()
            );
        }
        if c.snap_state() == SnapState::Idle {
            break;
        }
    }

    let centered = c
        .scroller()
        .snap_target(recycler::Alignment::Center, false)
        .map(|t| t.data_index);
    println!(
        "settled at t={now_ms}: pos={:.1} centered card={centered:?}",
        c.scroller().scroll_position()
    );
}
