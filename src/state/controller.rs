//! Countdown controller: the Idle/Running state machine

use std::{future, time::Duration};

use tracing::{debug, info};

use super::{
    presets::preset, CompletionPolicy, CountdownSnapshot, CountingState, TimeAccumulator,
};
use crate::{
    error::{CountdownError, Result},
    services::{NotificationScheduler, COMPLETION_MESSAGE},
    tasks::ticker::{TimerHandle, TICK_PERIOD},
    view::Presenter,
};

/// Launch-time settings for the controller
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub policy: CompletionPolicy,
    pub tick_period: Duration,
    pub message: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            policy: CompletionPolicy::default(),
            tick_period: TICK_PERIOD,
            message: COMPLETION_MESSAGE.to_string(),
        }
    }
}

/// Owns the remaining time, the counting state and the timer.
///
/// Every state change goes through a setter that mutates first and then
/// pushes the new value to the presenter. The timer handle only exists while
/// the state is `Running`.
pub struct CountdownController<P: Presenter, N: NotificationScheduler> {
    accumulator: TimeAccumulator,
    state: CountingState,
    timer: Option<TimerHandle>,
    completion_pending: bool,
    presenter: P,
    notifier: N,
    options: ControllerOptions,
}

impl<P: Presenter, N: NotificationScheduler> CountdownController<P, N> {
    /// Create an idle controller and draw the initial screen state
    pub fn new(presenter: P, notifier: N, options: ControllerOptions) -> Self {
        let mut controller = Self {
            accumulator: TimeAccumulator::new(),
            state: CountingState::Idle,
            timer: None,
            completion_pending: false,
            presenter,
            notifier,
            options,
        };
        controller.presenter.render_remaining(0);
        controller.presenter.set_counting(false);
        controller.presenter.set_controls_enabled(true);
        controller
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot::new(self.state, self.accumulator.remaining_seconds())
    }

    pub fn state(&self) -> CountingState {
        self.state
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.accumulator.remaining_seconds()
    }

    pub fn completion_pending(&self) -> bool {
        self.completion_pending
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Add the preset at `index` to the remaining time
    pub fn apply_preset(&mut self, index: usize) -> Result<u64> {
        self.ensure_idle("apply a preset")?;
        let preset = preset(index).ok_or(CountdownError::UnknownPreset(index))?;
        debug!("Preset {} adds {}s", preset.label, preset.seconds_delta);
        self.set_remaining(|acc| {
            acc.apply_preset(preset.seconds_delta);
        });
        Ok(self.remaining_seconds())
    }

    /// Clear the remaining time
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_idle("reset")?;
        debug!("Resetting remaining time");
        self.set_remaining(TimeAccumulator::reset);
        Ok(())
    }

    /// Start or stop the countdown and return the new state
    pub fn toggle(&mut self) -> CountingState {
        let next = self.state.toggled();
        self.set_counting(next);

        if next.is_running() {
            let remaining = self.remaining_seconds();
            self.notifier.schedule_after(remaining, &self.options.message);
        } else {
            self.notifier.cancel_all();
        }
        next
    }

    /// Handle one timer tick. Returns `true` when the terminal signal fired.
    pub fn on_tick(&mut self) -> bool {
        if !self.state.is_running() {
            debug!("Ignoring tick while idle");
            return false;
        }

        let mut finished = false;
        self.set_remaining(|acc| finished = acc.tick());
        if !finished {
            return false;
        }

        info!("Countdown complete");
        self.completion_pending = true;
        self.presenter.show_completion(&self.options.message);

        if self.options.policy == CompletionPolicy::Stop {
            // The scheduled alert is due now, so it is left in place.
            self.set_counting(CountingState::Idle);
        }
        true
    }

    /// Wait for the next timer tick. Never resolves while idle.
    pub async fn next_tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }

    /// The user dismissed the completion prompt
    pub fn acknowledge_completion(&mut self) {
        if self.completion_pending {
            self.completion_pending = false;
            self.presenter.dismiss_completion();
        }
    }

    /// Stop a running countdown before the process exits
    pub fn shutdown(&mut self) {
        if self.state.is_running() {
            self.set_counting(CountingState::Idle);
            self.notifier.cancel_all();
        }
    }

    fn ensure_idle(&self, action: &'static str) -> Result<()> {
        if self.state.is_running() {
            return Err(CountdownError::Busy { action });
        }
        Ok(())
    }

    fn set_remaining<F>(&mut self, update: F)
    where
        F: FnOnce(&mut TimeAccumulator),
    {
        update(&mut self.accumulator);
        self.presenter
            .render_remaining(self.accumulator.remaining_seconds());
    }

    fn set_counting(&mut self, next: CountingState) {
        if next == self.state {
            return;
        }

        match next {
            CountingState::Running => {
                let timer = TimerHandle::start(self.options.tick_period);
                info!(
                    "Countdown started with {}s remaining, ticking every {:?}",
                    self.accumulator.remaining_seconds(),
                    timer.period()
                );
                self.timer = Some(timer);
            }
            CountingState::Idle => {
                if let Some(timer) = self.timer.take() {
                    debug!("Timer stopped after {} ticks", timer.fired());
                }
                info!(
                    "Countdown stopped with {}s remaining",
                    self.accumulator.remaining_seconds()
                );
            }
        }

        self.state = next;
        self.presenter.set_counting(next.is_running());
        self.presenter.set_controls_enabled(!next.is_running());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HeadlessView;

    #[derive(Debug, Default)]
    struct CountingNotifier {
        scheduled: Vec<u64>,
        cancels: usize,
    }

    impl NotificationScheduler for CountingNotifier {
        fn schedule_after(&mut self, seconds: u64, _message: &str) {
            self.scheduled.push(seconds);
        }

        fn cancel_all(&mut self) {
            self.cancels += 1;
        }
    }

    fn controller(
        policy: CompletionPolicy,
    ) -> CountdownController<HeadlessView<Vec<u8>>, CountingNotifier> {
        CountdownController::new(
            HeadlessView::new(Vec::new()),
            CountingNotifier::default(),
            ControllerOptions {
                policy,
                ..ControllerOptions::default()
            },
        )
    }

    #[tokio::test]
    async fn presets_and_reset_are_rejected_while_running() {
        let mut c = controller(CompletionPolicy::Stop);
        c.apply_preset(0).unwrap();
        c.toggle();

        assert_eq!(
            c.apply_preset(1),
            Err(CountdownError::Busy { action: "apply a preset" })
        );
        assert_eq!(c.reset(), Err(CountdownError::Busy { action: "reset" }));
        assert_eq!(c.remaining_seconds(), 60);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let mut c = controller(CompletionPolicy::Stop);
        assert_eq!(c.apply_preset(9), Err(CountdownError::UnknownPreset(9)));
    }

    #[test]
    fn ticks_while_idle_do_nothing() {
        let mut c = controller(CompletionPolicy::Stop);
        c.apply_preset(3).unwrap();
        assert!(!c.on_tick());
        assert_eq!(c.remaining_seconds(), 1);
    }

    #[tokio::test]
    async fn stop_policy_returns_to_idle_without_cancelling() {
        let mut c = controller(CompletionPolicy::Stop);
        c.apply_preset(3).unwrap();
        c.toggle();

        assert!(c.on_tick());
        assert_eq!(c.state(), CountingState::Idle);
        assert_eq!(c.remaining_seconds(), 0);
        assert!(c.completion_pending());
        assert_eq!(c.notifier().cancels, 0);
        assert!(!c.on_tick());
    }

    #[tokio::test]
    async fn repeat_policy_prompts_on_every_tick() {
        let mut c = controller(CompletionPolicy::Repeat);
        c.apply_preset(3).unwrap();
        c.toggle();

        assert!(c.on_tick());
        assert!(c.on_tick());
        assert!(c.on_tick());
        assert_eq!(c.state(), CountingState::Running);
        assert_eq!(c.remaining_seconds(), 0);

        c.toggle();
        assert_eq!(c.notifier().scheduled, vec![1]);
        assert_eq!(c.notifier().cancels, 1);
    }

    #[tokio::test]
    async fn acknowledging_clears_the_prompt_once() {
        let mut c = controller(CompletionPolicy::Stop);
        c.toggle();
        assert!(c.on_tick());
        c.acknowledge_completion();
        assert!(!c.completion_pending());
        c.acknowledge_completion();
    }

    #[tokio::test(start_paused = true)]
    async fn timer_drives_ticks_once_per_period() {
        let mut c = controller(CompletionPolicy::Stop);
        c.apply_preset(0).unwrap();
        c.toggle();

        let started = tokio::time::Instant::now();
        for _ in 0..3 {
            c.next_tick().await;
            c.on_tick();
        }
        assert_eq!(started.elapsed(), Duration::from_secs(3));
        assert_eq!(c.remaining_seconds(), 57);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_controller_never_ticks() {
        let mut c = controller(CompletionPolicy::Stop);
        c.apply_preset(0).unwrap();
        c.toggle();
        c.toggle();

        let waited = tokio::time::timeout(Duration::from_secs(5), c.next_tick()).await;
        assert!(waited.is_err());
        assert_eq!(c.remaining_seconds(), 60);
    }
}
