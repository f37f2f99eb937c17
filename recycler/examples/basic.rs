use recycler::{
    Alignment, CellBinding, CellSource, CellView, ScrollDirection, Scroller, ScrollerOptions,
};

#[derive(Debug)]
struct Label {
    id: usize,
    binding: Option<CellBinding>,
    height: f32,
}

impl CellView for Label {
    type Kind = &'static str;

    fn kind(&self) -> &'static str {
        "label"
    }

    fn binding(&self) -> Option<CellBinding> {
        self.binding
    }

    fn set_binding(&mut self, binding: Option<CellBinding>) {
        self.binding = binding;
    }

    fn set_main_size(&mut self, size: f32) {
        self.height = size;
    }
}

struct Feed {
    created: usize,
}

impl CellSource for Feed {
    type View = Label;

    fn cell_count(&self) -> usize {
        10_000
    }

    fn cell_size(&self, data_index: usize) -> f32 {
        // Every tenth row is a taller header.
        if data_index % 10 == 0 { 64.0 } else { 32.0 }
    }

    fn cell_kind(&self, _data_index: usize) -> &'static str {
        "label"
    }

    fn create_view(&mut self, _kind: &&'static str, binding: CellBinding) -> Label {
        self.created += 1;
        Label {
            id: self.created,
            binding: Some(binding),
            height: 0.0,
        }
    }
}

fn main() {
    // Example: a headless list of 10k rows. A UI adapter would render `views()` using the
    // bindings and sizes, and place spacers of `padders()` around them.
    let mut s = Scroller::new(
        Feed { created: 0 },
        ScrollerOptions::vertical(480.0).with_spacing(4.0),
    );
    s.reload(0.0);
    println!(
        "content={} range={:?} created={}",
        s.content_size(),
        s.visible_range(),
        s.source().created
    );

    for step in 1..=5 {
        s.set_scroll_position(step as f32 * 120.0);
        s.update();
        let ids: Vec<usize> = s.views().map(|v| v.id).collect();
        println!(
            "pos={} range={:?} padders={:?} ids={ids:?}",
            s.scroll_position(),
            s.window().range(),
            s.padders()
        );
    }

    let target = s.scroll_target_for_alignment(5_000, Alignment::Center, true);
    s.set_scroll_position(target);
    s.update();
    println!(
        "centered 5000: pos={target} start={} end={} pooled={} created={}",
        s.start_data_index(),
        s.end_data_index(),
        s.pool().len(),
        s.source().created
    );

    // Looping: the position wraps around the seam.
    s.set_loop(true);
    let g = *s.loop_geometry().expect("10k rows loop");
    s.set_position_with_dir(g.last_jump_trigger + 10.0, ScrollDirection::Forward);
    s.update();
    println!(
        "looping: pos={} first_data={} slots={}",
        s.scroll_position(),
        s.start_data_index(),
        s.table().len()
    );
}
