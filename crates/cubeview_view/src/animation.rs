use std::collections::VecDeque;

use cgmath::{Matrix3, Rad, SquareMatrix, Vector3};
use cubeview_core::{CubieId, FaceletState, Move};
use cubeview_prefs::AnimationPreferences;
use smallvec::SmallVec;

/// Higher number means faster exponential increase in move speed.
const EXP_TWIST_FACTOR: f32 = 0.5;

/// Move waiting for its animation to start.
#[derive(Debug, Clone)]
pub(crate) struct QueuedMove {
    pub mv: Move,
    /// Facelet state to display once the move completes.
    pub new_state: Option<FaceletState>,
}

/// Animation of one move in progress.
#[derive(Debug, Clone)]
pub(crate) struct MoveAnimation {
    pub mv: Move,
    /// Cubies attached to the pivot.
    pub members: SmallVec<[CubieId; 9]>,
    pub new_state: Option<FaceletState>,

    axis: Vector3<f32>,
    /// Total rotation angle in radians.
    total_angle: f32,
    /// Rotation applied to the pivot so far, in radians.
    applied_angle: f32,
    /// Animation time so far, in seconds.
    elapsed: f32,
    /// Current rotation of the pivot.
    pivot: Matrix3<f32>,
}
impl MoveAnimation {
    pub fn new(queued: QueuedMove, members: SmallVec<[CubieId; 9]>) -> Self {
        let QueuedMove { mv, new_state } = queued;
        Self {
            mv,
            members,
            new_state,

            axis: mv.axis().unit_vector(),
            total_angle: mv.angle(),
            applied_angle: 0.0,
            elapsed: 0.0,
            pivot: Matrix3::identity(),
        }
    }

    /// Returns the rotation of the pivot.
    pub fn pivot(&self) -> &Matrix3<f32> {
        &self.pivot
    }
    /// Returns the exact rotation of the whole move.
    pub fn final_rotation(&self) -> Matrix3<f32> {
        Matrix3::from_axis_angle(self.axis, Rad(self.total_angle))
    }
    /// Returns the fraction of the rotation that has been applied.
    pub fn progress(&self) -> f32 {
        if self.total_angle == 0.0 {
            1.0
        } else {
            self.applied_angle / self.total_angle
        }
    }

    /// Advances the animation by `dt` seconds. Returns whether the move is
    /// complete.
    ///
    /// Only the change in angle since the last call is applied to the pivot.
    pub fn proceed(&mut self, dt: f32, prefs: &AnimationPreferences) -> bool {
        self.elapsed += dt;

        let duration = prefs.twist_duration;
        let mut progress = self.elapsed / duration;
        // Complete instantly on zero, negative, or non-finite durations.
        if !(duration > 0.0 && duration.is_finite() && progress.is_finite()) {
            progress = 1.0;
        }

        let target_angle = if progress >= 1.0 {
            self.total_angle
        } else {
            self.total_angle * prefs.twist_interpolation.interpolate(progress)
        };
        let delta = target_angle - self.applied_angle;
        self.applied_angle = target_angle;
        self.pivot = Matrix3::from_axis_angle(self.axis, Rad(delta)) * self.pivot;

        progress >= 1.0
    }
}

/// FIFO queue of move animations. At most one move is active at a time.
#[derive(Debug, Default, Clone)]
pub(crate) struct MoveAnimationState {
    /// Moves waiting to start.
    queue: VecDeque<QueuedMove>,
    /// Maximum number of moves in flight (reset when idle).
    queue_max: usize,
    /// Move being animated.
    active: Option<MoveAnimation>,
}
impl MoveAnimationState {
    pub fn push(&mut self, queued: QueuedMove) {
        self.queue.push_back(queued);
        self.queue_max = std::cmp::max(self.queue_max, self.len());
    }
    pub fn pop_queued(&mut self) -> Option<QueuedMove> {
        self.queue.pop_front()
    }

    pub fn active(&self) -> Option<&MoveAnimation> {
        self.active.as_ref()
    }
    pub fn active_mut(&mut self) -> Option<&mut MoveAnimation> {
        self.active.as_mut()
    }
    pub fn set_active(&mut self, anim: MoveAnimation) {
        self.active = Some(anim);
    }
    pub fn take_active(&mut self) -> Option<MoveAnimation> {
        self.active.take()
    }

    /// Returns the number of moves in flight, including the active one.
    pub fn len(&self) -> usize {
        self.queue.len() + self.active.is_some() as usize
    }
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.queue.is_empty()
    }
    pub fn reset_queue_max(&mut self) {
        self.queue_max = 0;
    }

    /// Returns the factor by which animation time is sped up.
    pub fn speed_mod(&self, prefs: &AnimationPreferences) -> f32 {
        match prefs.dynamic_twist_speed {
            true => (self.queue_max.saturating_sub(1) as f32 * EXP_TWIST_FACTOR).exp(),
            false => 1.0,
        }
    }
}
