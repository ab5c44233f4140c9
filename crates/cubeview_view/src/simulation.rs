use cgmath::{Matrix3, SquareMatrix};
use cubeview_core::{ColorScheme, CubeError, CubeModel, CubieId, Face, FaceletState, Move};
use cubeview_prefs::{AnimationPreferences, Preferences};
use smallvec::SmallVec;
use web_time::{Duration, Instant};

use crate::CubeRenderer;
use crate::animation::{MoveAnimation, MoveAnimationState, QueuedMove};

const ASSUMED_FPS: f32 = 120.0;

/// Cube simulation, which manages the cube model, move animations, and the
/// renderer.
#[derive(Debug)]
pub struct CubeSimulation<R> {
    model: CubeModel,
    renderer: R,

    colors: ColorScheme,
    animation_prefs: AnimationPreferences,

    /// Facelet state currently displayed, if known.
    latest_state: Option<FaceletState>,
    /// Facelet state once every queued move completes, if known.
    target_state: Option<FaceletState>,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,
    /// Move animation state.
    move_anim: MoveAnimationState,
}
impl<R: CubeRenderer> CubeSimulation<R> {
    /// Constructs a new simulation with all cubies at home and every face
    /// hidden, and creates the cubies in the renderer.
    pub fn new(mut renderer: R, prefs: &Preferences) -> Self {
        let model = CubeModel::new(prefs.geometry.cubie_size);
        let edge_length = prefs.geometry.cubie_edge_length();
        for (id, cubie) in model.iter() {
            renderer.create_cubie(id, cubie.transform(), edge_length);
        }

        let mut ret = Self {
            model,
            renderer,

            colors: prefs.colors.clone(),
            animation_prefs: prefs.animation.clone(),

            latest_state: None,
            target_state: None,

            last_frame_time: None,
            move_anim: MoveAnimationState::default(),
        };
        ret.push_all_colors();
        ret.renderer.request_redraw();
        ret
    }

    /// Returns the cube model. While a move is animating, this does not
    /// include the in-progress rotation.
    pub fn model(&self) -> &CubeModel {
        &self.model
    }
    /// Returns the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
    /// Consumes the simulation and returns the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Returns the facelet state currently displayed, or `None` if no state
    /// has been set since construction or the last reset.
    pub fn latest_state(&self) -> Option<&FaceletState> {
        self.latest_state.as_ref()
    }
    /// Returns the facelet state that will be displayed once every queued move
    /// completes, if known.
    pub fn target_state(&self) -> Option<&FaceletState> {
        self.target_state.as_ref()
    }

    /// Returns whether a move is animating or queued.
    pub fn is_animating(&self) -> bool {
        !self.move_anim.is_idle()
    }
    /// Returns the number of moves animating or queued.
    pub fn pending_moves(&self) -> usize {
        self.move_anim.len()
    }
    /// Returns the move being animated and the fraction of its rotation that
    /// has been applied.
    pub fn current_move(&self) -> Option<(Move, f32)> {
        let anim = self.move_anim.active()?;
        Some((anim.mv, anim.progress()))
    }
    /// Returns the cubies attached to the pivot.
    pub fn pivot_members(&self) -> &[CubieId] {
        match self.move_anim.active() {
            Some(anim) => anim.members.as_slice(),
            None => &[],
        }
    }

    /// Returns the animation preferences.
    pub fn animation_prefs(&self) -> &AnimationPreferences {
        &self.animation_prefs
    }
    /// Sets the animation preferences. This takes effect on the next frame.
    pub fn set_animation_prefs(&mut self, prefs: AnimationPreferences) {
        self.animation_prefs = prefs;
    }
    /// Returns the color scheme.
    pub fn color_scheme(&self) -> &ColorScheme {
        &self.colors
    }
    /// Sets the color scheme and recolors the displayed state.
    pub fn set_color_scheme(&mut self, colors: ColorScheme) {
        self.colors = colors;
        if let Some(state) = self.latest_state {
            self.show_state(state);
        }
    }

    /// Parses a facelet string and colors the cubies from it, completing any
    /// move animations first.
    ///
    /// If the string is invalid, nothing changes.
    pub fn colorize(&mut self, state: &str) -> Result<(), CubeError> {
        let state = state.parse()?;
        self.set_state(state);
        Ok(())
    }
    /// Colors the cubies from a facelet state, completing any move animations
    /// first.
    pub fn set_state(&mut self, state: FaceletState) {
        self.skip_animations();
        self.show_state(state);
        self.target_state = Some(state);
    }

    /// Parses a move and the facelet string after the move, and queues the
    /// move. The new state is displayed once the move completes.
    ///
    /// If either string is invalid, nothing changes.
    pub fn apply_move(&mut self, mv: &str, new_state: &str) -> Result<(), CubeError> {
        let mv = mv.parse()?;
        let new_state = new_state.parse()?;
        self.queue_move(mv, Some(new_state));
        Ok(())
    }
    /// Parses a whitespace-separated sequence of moves and queues them.
    ///
    /// If the target state is known, each move's new state is computed from
    /// it. If any move is invalid, nothing changes.
    pub fn apply_moves(&mut self, moves: &str) -> Result<(), CubeError> {
        for mv in cubeview_core::parse_moves(moves)? {
            self.queue_move(mv, None);
        }
        Ok(())
    }
    /// Queues a move. If `new_state` is `None`, it is computed from the target
    /// state when that is known.
    ///
    /// If no move is animating, the move starts immediately.
    pub fn queue_move(&mut self, mv: Move, new_state: Option<FaceletState>) {
        let new_state = new_state.or_else(|| Some(self.target_state?.apply_move(mv)));
        self.target_state = new_state;
        self.move_anim.push(QueuedMove { mv, new_state });
        if self.move_anim.active().is_none() {
            self.start_next_move();
        }
    }

    /// Advances the animation by `delta`. Returns whether the cube must be
    /// redrawn.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.move_anim.active().is_none() {
            self.start_next_move();
        }

        let speed_mod = self.move_anim.speed_mod(&self.animation_prefs);
        let Some(anim) = self.move_anim.active_mut() else {
            self.move_anim.reset_queue_max();
            return false;
        };

        let is_complete = anim.proceed(delta.as_secs_f32() * speed_mod, &self.animation_prefs);
        self.renderer.set_pivot_rotation(anim.pivot());
        if is_complete {
            // Leftover time is not carried over to the next move.
            self.finish_active_move();
            self.start_next_move();
        }

        self.renderer.request_redraw();
        true
    }

    /// Advances the animation using the time since the last frame. Returns
    /// whether the cube must be redrawn.
    pub fn step(&mut self) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.tick(delta);
        self.last_frame_time = needs_redraw.then_some(now);
        needs_redraw
    }

    /// Completes every queued move immediately.
    pub fn skip_animations(&mut self) {
        while self.move_anim.active().is_some() {
            self.finish_active_move();
            self.start_next_move();
        }
        self.move_anim.reset_queue_max();
        self.last_frame_time = None;
    }

    /// Drops all move animations and returns every cubie to its home position
    /// and orientation. Colors are not changed.
    pub fn reset(&mut self) {
        if let Some(anim) = self.move_anim.take_active() {
            for &id in &anim.members {
                self.renderer.detach_from_pivot(id);
            }
            log::debug!("dropped {} in reset", anim.mv);
        }
        self.move_anim = MoveAnimationState::default();
        self.renderer.set_pivot_rotation(&Matrix3::identity());

        self.model.reset();
        for (id, cubie) in self.model.iter() {
            self.renderer.set_transform(id, cubie.transform());
        }

        self.latest_state = None;
        self.target_state = None;
        self.last_frame_time = None;
        self.renderer.request_redraw();
    }

    /// Attaches the layer of the next queued move to the pivot.
    fn start_next_move(&mut self) {
        while let Some(queued) = self.move_anim.pop_queued() {
            let members: SmallVec<[CubieId; 9]> =
                self.model.layer(queued.mv.face).into_iter().collect();
            if members.is_empty() {
                log::warn!("no cubies in layer for {}; skipping move", queued.mv);
                if let Some(state) = queued.new_state {
                    self.show_state(state);
                }
                continue;
            }

            log::debug!("starting {}", queued.mv);
            for &id in &members {
                self.renderer.attach_to_pivot(id);
            }
            self.renderer.set_pivot_rotation(&Matrix3::identity());
            self.move_anim.set_active(MoveAnimation::new(queued, members));
            return;
        }
        self.move_anim.reset_queue_max();
    }

    /// Detaches the layer of the active move from the pivot, snaps it to the
    /// lattice, and displays the move's new state.
    fn finish_active_move(&mut self) {
        let Some(anim) = self.move_anim.take_active() else {
            return;
        };

        for &id in &anim.members {
            self.renderer.detach_from_pivot(id);
        }
        self.model.rotate_cubies(&anim.members, &anim.final_rotation());
        for &id in &anim.members {
            self.renderer.set_transform(id, self.model.cubie(id).transform());
        }
        self.renderer.set_pivot_rotation(&Matrix3::identity());
        log::debug!("finished {}", anim.mv);

        if let Some(state) = anim.new_state {
            self.show_state(state);
        }
    }

    fn show_state(&mut self, state: FaceletState) {
        self.model.colorize(&state, &self.colors);
        self.latest_state = Some(state);
        self.push_all_colors();
        self.renderer.request_redraw();
    }

    fn push_all_colors(&mut self) {
        for (id, cubie) in self.model.iter() {
            for slot in Face::ALL {
                self.renderer.set_face_color(id, slot, cubie.color(slot));
            }
        }
    }
}
