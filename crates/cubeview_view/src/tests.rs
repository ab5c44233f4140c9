use std::collections::BTreeSet;

use cgmath::{Matrix3, Rad, SquareMatrix};
use cubeview_core::{
    Axis, CUBIE_COUNT, ColorScheme, Coords, CubeError, CubieId, FACELET_COUNT, Face, FaceletState,
    MoveError, Rgb, Transform, facelet_location, parse_moves,
};
use cubeview_prefs::{InterpolateFn, Preferences};
use pretty_assertions::assert_eq;
use web_time::Duration;

use super::*;

const FRAME: Duration = Duration::from_millis(16);

/// Renderer that records the scene it would display.
#[derive(Debug)]
struct Recorder {
    transforms: Vec<Transform>,
    edge_length: f32,
    colors: [[Rgb; 6]; CUBIE_COUNT],
    attached: BTreeSet<CubieId>,
    max_attached: usize,
    pivot: Matrix3<f32>,
    redraws: usize,
}
impl Default for Recorder {
    fn default() -> Self {
        Self {
            transforms: vec![],
            edge_length: 0.0,
            colors: [[Rgb::default(); 6]; CUBIE_COUNT],
            attached: BTreeSet::new(),
            max_attached: 0,
            pivot: Matrix3::identity(),
            redraws: 0,
        }
    }
}
impl CubeRenderer for Recorder {
    fn create_cubie(&mut self, id: CubieId, transform: &Transform, edge_length: f32) {
        assert_eq!(self.transforms.len(), id.index());
        self.transforms.push(*transform);
        self.edge_length = edge_length;
    }
    fn set_face_color(&mut self, id: CubieId, slot: Face, color: Rgb) {
        self.colors[id.index()][slot.slot()] = color;
    }
    fn set_transform(&mut self, id: CubieId, transform: &Transform) {
        assert!(!self.attached.contains(&id), "{id} moved while on the pivot");
        self.transforms[id.index()] = *transform;
    }
    fn attach_to_pivot(&mut self, id: CubieId) {
        assert!(self.attached.insert(id), "{id} attached twice");
        self.max_attached = self.max_attached.max(self.attached.len());
    }
    fn set_pivot_rotation(&mut self, rotation: &Matrix3<f32>) {
        self.pivot = *rotation;
    }
    fn detach_from_pivot(&mut self, id: CubieId) {
        assert!(self.attached.remove(&id), "{id} was not attached");
    }
    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

fn new_sim() -> CubeSimulation<Recorder> {
    CubeSimulation::new(Recorder::default(), &Preferences::default())
}

fn solved_sim() -> CubeSimulation<Recorder> {
    let mut sim = new_sim();
    sim.set_state(FaceletState::solved());
    sim
}

/// Ticks until the simulation no longer needs to be redrawn. Returns the number
/// of frames that needed a redraw.
fn run(sim: &mut CubeSimulation<Recorder>) -> usize {
    let mut frames = 0;
    while sim.tick(FRAME) {
        frames += 1;
        assert!(frames < 10_000, "animation never finished");
    }
    frames
}

/// Asserts that the renderer shows exactly what the model contains.
fn assert_renderer_matches_model(sim: &CubeSimulation<Recorder>) {
    let r = sim.renderer();
    for (id, cubie) in sim.model().iter() {
        assert_eq!(*cubie.transform(), r.transforms[id.index()], "{id}");
        assert_eq!(*cubie.colors(), r.colors[id.index()], "{id}");
    }
}

/// Asserts that every facelet visible on the model has the color of `state`.
fn assert_shows_state(sim: &CubeSimulation<Recorder>, state: &FaceletState) {
    let model = sim.model();
    let scheme = sim.color_scheme();
    for i in 0..FACELET_COUNT {
        let (face, coords) = facelet_location(i).unwrap();
        let cubie = model.cubie(model.cubie_at(coords).unwrap());
        assert_eq!(
            scheme.color_for(state[i]),
            cubie.color(cubie.slot_facing(face)),
            "facelet {i}",
        );
    }
}

fn assert_matrix_near(expected: Matrix3<f32>, actual: Matrix3<f32>) {
    let diff = expected - actual;
    for col in [diff.x, diff.y, diff.z] {
        for v in [col.x, col.y, col.z] {
            assert!(v.abs() < 1e-4, "expected {expected:?}, got {actual:?}");
        }
    }
}

#[test]
fn test_new_creates_hidden_cubies() {
    let sim = new_sim();
    let r = sim.renderer();
    assert_eq!(CUBIE_COUNT, r.transforms.len());
    assert!((r.edge_length - 0.98).abs() < 1e-6);
    assert_renderer_matches_model(&sim);
    let hidden = sim.color_scheme().hidden;
    assert!(r.colors.iter().flatten().all(|&c| c == hidden));
    assert!(!sim.is_animating());
    assert_eq!(None, sim.latest_state());
}

#[test]
fn test_colorize() {
    let mut sim = new_sim();
    sim.colorize(&FaceletState::solved().to_string()).unwrap();
    assert_renderer_matches_model(&sim);
    assert_shows_state(&sim, &FaceletState::solved());
    assert_eq!(Rgb::WHITE, sim.renderer().colors[26][Face::U.slot()]);
    assert_eq!(Some(&FaceletState::solved()), sim.latest_state());
}

#[test]
fn test_invalid_state_leaves_colors_unchanged() {
    let mut sim = solved_sim();
    let colors_before = sim.renderer().colors;
    let model_before = sim.model().clone();

    let mut short = FaceletState::solved().to_string();
    short.pop();
    assert_eq!(Err(CubeError::InvalidState { len: 53 }), sim.colorize(&short));
    assert_eq!(
        Err(CubeError::InvalidState { len: 55 }),
        sim.colorize(&format!("{}W", FaceletState::solved())),
    );

    assert_eq!(colors_before, sim.renderer().colors);
    assert_eq!(model_before, *sim.model());
    assert_eq!(Some(&FaceletState::solved()), sim.latest_state());
}

#[test]
fn test_r_then_r_prime_restores() {
    let mut sim = solved_sim();
    let solved = FaceletState::solved();
    let after_r = solved.apply_move("R".parse().unwrap());

    sim.apply_move("R", &after_r.to_string()).unwrap();
    sim.apply_move("R'", &solved.to_string()).unwrap();
    assert_eq!(2, sim.pending_moves());

    // 250 ms per move at 16 ms per frame
    assert_eq!(32, run(&mut sim));
    assert!(!sim.is_animating());
    assert!(sim.model().is_home());
    assert_eq!(Some(&solved), sim.latest_state());
    assert_shows_state(&sim, &solved);
    assert_renderer_matches_model(&sim);

    let r = sim.renderer();
    assert_eq!(9, r.max_attached);
    assert!(r.attached.is_empty());
    assert_eq!(Matrix3::identity(), r.pivot);
}

#[test]
fn test_u2_equals_u_u() {
    let mut a = solved_sim();
    a.apply_moves("U2").unwrap();
    run(&mut a);

    let mut b = solved_sim();
    b.apply_moves("U U").unwrap();
    run(&mut b);

    assert_eq!(b.model(), a.model());
    assert_eq!(b.latest_state(), a.latest_state());
    assert_eq!(b.renderer().colors, a.renderer().colors);
}

#[test]
fn test_invalid_move_changes_nothing() {
    let mut sim = solved_sim();
    let model_before = sim.model().clone();
    let redraws_before = sim.renderer().redraws;
    let solved = FaceletState::solved().to_string();

    assert_eq!(
        Err(CubeError::InvalidMove {
            token: "X".to_string(),
            reason: MoveError::UnknownFace('X'),
        }),
        sim.apply_move("X", &solved),
    );
    assert!(sim.apply_move("R", "too short").is_err());
    assert!(sim.apply_moves("R U X").is_err());

    assert!(!sim.is_animating());
    assert!(!sim.tick(FRAME));
    assert_eq!(model_before, *sim.model());
    assert_eq!(redraws_before, sim.renderer().redraws);
    assert!(sim.renderer().attached.is_empty());
}

#[test]
fn test_progress_follows_elapsed_time() {
    let mut sim = solved_sim();
    let id = sim.model().cubie_at(Coords::new(1, 0, 1)).unwrap();
    sim.apply_moves("R").unwrap();
    assert_eq!(9, sim.renderer().attached.len());
    assert!(sim.renderer().attached.contains(&id));

    assert!(sim.tick(Duration::from_millis(125)));
    let (mv, progress) = sim.current_move().unwrap();
    assert_eq!("R", mv.to_string());
    assert!((progress - 0.5).abs() < 1e-5);
    assert_matrix_near(
        Matrix3::from_axis_angle(Axis::X.unit_vector(), Rad(-std::f32::consts::FRAC_PI_4)),
        sim.renderer().pivot,
    );
    // Logical coordinates change only once the move completes.
    assert_eq!(Coords::new(1, 0, 1), sim.model().cubie(id).coords());

    assert!(sim.tick(Duration::from_millis(125)));
    assert_eq!(None, sim.current_move());
    assert_eq!(Coords::new(1, 1, 0), sim.model().cubie(id).coords());
    assert!(sim.renderer().attached.is_empty());
    assert!(!sim.tick(FRAME));
}

#[test]
fn test_queued_moves_run_one_at_a_time() {
    let mut sim = solved_sim();
    sim.apply_moves("R U").unwrap();
    assert_eq!(2, sim.pending_moves());

    let r_layer: BTreeSet<CubieId> = sim.model().layer(Face::R).into_iter().collect();
    assert_eq!(r_layer, sim.renderer().attached);
    assert_eq!(r_layer, sim.pivot_members().iter().copied().collect::<BTreeSet<_>>());

    sim.tick(Duration::from_millis(250));
    assert_eq!(1, sim.pending_moves());
    // The U layer is chosen after R has moved the cubies.
    let u_layer: BTreeSet<CubieId> = sim.model().layer(Face::U).into_iter().collect();
    assert_eq!(u_layer, sim.renderer().attached);
    assert_eq!("U", sim.current_move().unwrap().0.to_string());
    assert!(sim.current_move().unwrap().1 < 1e-6);

    run(&mut sim);
    assert_eq!(9, sim.renderer().max_attached);
    let expected = FaceletState::solved().apply_moves(parse_moves("R U").unwrap());
    assert_eq!(Some(&expected), sim.latest_state());
}

#[test]
fn test_animated_colors_match_facelet_moves() {
    let moves = "R U F' D2 B L' U2 R' F2 D B' L";
    let mut sim = solved_sim();
    sim.apply_moves(moves).unwrap();
    let expected = FaceletState::solved().apply_moves(parse_moves(moves).unwrap());
    assert_eq!(Some(&expected), sim.target_state());

    run(&mut sim);
    assert_eq!(Some(&expected), sim.latest_state());
    assert_shows_state(&sim, &expected);
    assert_renderer_matches_model(&sim);
}

#[test]
fn test_new_state_shown_on_completion() {
    let mut sim = solved_sim();
    let before = sim.renderer().colors;
    let after_f = FaceletState::solved().apply_move("F".parse().unwrap());
    sim.apply_move("F", &after_f.to_string()).unwrap();

    sim.tick(Duration::from_millis(100));
    assert_eq!(before, sim.renderer().colors);
    assert_eq!(Some(&FaceletState::solved()), sim.latest_state());

    run(&mut sim);
    assert_eq!(Some(&after_f), sim.latest_state());
    assert_shows_state(&sim, &after_f);
}

#[test]
fn test_dynamic_twist_speed() {
    let mut prefs = sim_prefs();
    prefs.animation.dynamic_twist_speed = true;
    let mut sim = solved_sim();
    sim.set_animation_prefs(prefs.animation.clone());
    sim.apply_moves("R U F").unwrap();
    // Three moves in flight: time runs e times faster.
    sim.tick(Duration::from_millis(100));
    assert_eq!(2, sim.pending_moves());

    let mut sim = solved_sim();
    sim.apply_moves("R U F").unwrap();
    sim.tick(Duration::from_millis(100));
    assert_eq!(3, sim.pending_moves());
}

#[test]
fn test_zero_duration_completes_instantly() {
    let mut prefs = sim_prefs();
    prefs.animation.twist_duration = 0.0;
    let mut sim = CubeSimulation::new(Recorder::default(), &prefs);
    sim.set_state(FaceletState::solved());
    let id = sim.model().cubie_at(Coords::new(1, 0, 1)).unwrap();
    sim.apply_moves("R").unwrap();
    assert!(sim.tick(Duration::ZERO));
    assert!(!sim.is_animating());
    assert_eq!(Coords::new(1, 1, 0), sim.model().cubie(id).coords());
    let expected = FaceletState::solved().apply_move("R".parse().unwrap());
    assert_eq!(Some(&expected), sim.latest_state());
}

#[test]
fn test_interpolation_changes_only_the_path() {
    let mut prefs = sim_prefs();
    prefs.animation.twist_interpolation = InterpolateFn::Cubic;
    let mut sim = CubeSimulation::new(Recorder::default(), &prefs);
    sim.set_state(FaceletState::solved());
    sim.apply_moves("U").unwrap();
    sim.tick(Duration::from_millis(125));
    assert!((sim.current_move().unwrap().1 - 0.5).abs() < 1e-5);
    // Linear progress would be 0.748 here.
    sim.tick(Duration::from_millis(62));
    assert!(sim.current_move().unwrap().1 > 0.8);
    run(&mut sim);
    assert_shows_state(&sim, &FaceletState::solved().apply_move("U".parse().unwrap()));
}

#[test]
fn test_skip_animations() {
    let mut sim = solved_sim();
    sim.apply_moves("R U R' U'").unwrap();
    sim.tick(FRAME);
    sim.skip_animations();
    assert!(!sim.is_animating());
    assert!(sim.renderer().attached.is_empty());
    let expected = FaceletState::solved().apply_moves(parse_moves("R U R' U'").unwrap());
    assert_eq!(Some(&expected), sim.latest_state());
    assert_shows_state(&sim, &expected);
    assert_renderer_matches_model(&sim);
}

#[test]
fn test_colorize_completes_animations() {
    let mut sim = solved_sim();
    sim.apply_moves("R").unwrap();
    sim.colorize(&FaceletState::solved().to_string()).unwrap();
    assert!(!sim.is_animating());
    assert!(!sim.model().is_home());
    assert_shows_state(&sim, &FaceletState::solved());
}

#[test]
fn test_reset_mid_animation() {
    let mut sim = solved_sim();
    let colors_before = sim.renderer().colors;
    sim.apply_moves("R U").unwrap();
    sim.tick(Duration::from_millis(300));
    sim.tick(Duration::from_millis(50));
    assert!(sim.is_animating());

    sim.reset();
    assert!(!sim.is_animating());
    assert!(sim.model().is_home());
    assert!(sim.renderer().attached.is_empty());
    assert_eq!(Matrix3::identity(), sim.renderer().pivot);
    assert_renderer_matches_model(&sim);
    assert_eq!(None, sim.latest_state());
    assert_eq!(None, sim.target_state());
    // Cubies carry their colors through R, so once they are home the solved
    // colors are back on every face.
    assert_eq!(colors_before, sim.renderer().colors);
    assert_shows_state(&sim, &FaceletState::solved());
    assert!(!sim.tick(FRAME));
}

#[test]
fn test_reset_keeps_colors() {
    let mut sim = solved_sim();
    let colors_before = sim.renderer().colors;
    sim.reset();
    assert_eq!(colors_before, sim.renderer().colors);
}

#[test]
fn test_set_color_scheme_repaints_displayed_state() {
    let mut sim = solved_sim();
    sim.apply_moves("R").unwrap();
    run(&mut sim);
    let state = *sim.latest_state().unwrap();

    let mut colors = ColorScheme::default();
    colors.hidden = Rgb::BLACK;
    for sticker in &mut colors.stickers {
        sticker.color = Rgb::WHITE;
    }
    sim.set_color_scheme(colors);
    assert_eq!(Some(&state), sim.latest_state());
    assert_renderer_matches_model(&sim);
    assert_shows_state(&sim, &state);
    // Only stickers facing outward are white; everything else is hidden.
    let core = sim.model().cubie_at(Coords::new(0, 0, 0)).unwrap();
    assert_eq!([Rgb::BLACK; 6], sim.renderer().colors[core.index()]);
}

#[test]
fn test_set_color_scheme_before_any_state() {
    let mut sim = new_sim();
    let colors_before = sim.renderer().colors;
    let mut colors = ColorScheme::default();
    colors.hidden = Rgb::BLACK;
    sim.set_color_scheme(colors.clone());
    assert_eq!(&colors, sim.color_scheme());
    assert_eq!(colors_before, sim.renderer().colors);
}

#[test]
fn test_into_renderer() {
    let mut sim = solved_sim();
    sim.apply_moves("U").unwrap();
    let frames = run(&mut sim);
    let recorder = sim.into_renderer();
    assert!(recorder.attached.is_empty());
    assert_eq!(9, recorder.max_attached);
    assert!(recorder.redraws > frames);
}

#[test]
fn test_headless_renderer() {
    let mut sim = CubeSimulation::new((), &Preferences::default());
    sim.set_state(FaceletState::solved());
    sim.apply_moves("R U R' U'").unwrap();
    while sim.step() {
        sim.skip_animations();
    }
    assert!(!sim.is_animating());
    let expected = FaceletState::solved().apply_moves(parse_moves("R U R' U'").unwrap());
    assert_eq!(Some(&expected), sim.latest_state());
}

fn sim_prefs() -> Preferences {
    Preferences::default()
}
