// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the presentation views.

mod common;

use std::sync::Arc;

use common::{MockDevice, initial_state, quiet_config};
use homeeasy_lib::views::{
    BoundView, ClimateView, DisplaySwitch, FlowAxis, FlowSelect, HvacAction, HvacMode, SwingMode,
    ViewSet,
};
use homeeasy_lib::{
    Error, FanSpeed, HorizontalFlow, Mode, TemperatureScale, VerticalFlow, ViewToggles,
};
use parking_lot::Mutex;

// ============================================================================
// Climate
// ============================================================================

mod climate {
    use super::*;

    #[tokio::test]
    async fn reads_before_first_refresh_are_empty() {
        let device = MockDevice::new(initial_state());
        let coordinator = homeeasy_lib::Coordinator::builder(device.transport(), quiet_config())
            .build_without_refresh()
            .unwrap();
        let climate = ClimateView::new(coordinator);

        assert_eq!(climate.hvac_mode(), None);
        assert_eq!(climate.hvac_action(), HvacAction::Off);
        assert_eq!(climate.target_temperature(), None);
        assert_eq!(climate.temperature_unit(), TemperatureScale::Celsius);
        assert!(!climate.available());
    }

    #[tokio::test]
    async fn reads_reflect_cached_state() {
        let mut state = initial_state();
        state.power = true;
        state.mode = Mode::Heat;
        state.indoor_temperature = 19.5;
        state.desired_temperature = 23;
        state.fan_speed = FanSpeed::MidLow;
        let device = MockDevice::new(state);
        let climate = ClimateView::new(device.coordinator(quiet_config()).await);

        assert_eq!(climate.hvac_mode(), Some(HvacMode::Heat));
        assert_eq!(climate.hvac_action(), HvacAction::Heating);
        assert_eq!(climate.current_temperature(), Some(19.5));
        assert_eq!(climate.target_temperature(), Some(23));
        assert_eq!(climate.fan_mode(), Some("Mid-low"));
        assert_eq!(climate.swing_mode(), Some(SwingMode::Off));
        assert!(climate.available());
    }

    #[test]
    fn bounds() {
        assert_eq!(ClimateView::<common::MockTransport>::MIN_TEMPERATURE, 16);
        assert_eq!(ClimateView::<common::MockTransport>::MAX_TEMPERATURE, 31);
        assert_eq!(ClimateView::<common::MockTransport>::TEMPERATURE_STEP, 1);
    }

    #[tokio::test]
    async fn set_hvac_mode_powers_on() {
        let device = MockDevice::new(initial_state());
        let climate = ClimateView::new(device.coordinator(quiet_config()).await);

        climate.set_hvac_mode(HvacMode::Cool).await.unwrap();

        let sent = device.sent();
        assert!(sent[0].power);
        assert_eq!(sent[0].mode, Mode::Cool);
    }

    #[tokio::test]
    async fn turn_off_keeps_mode() {
        let mut state = initial_state();
        state.power = true;
        state.mode = Mode::Dry;
        let device = MockDevice::new(state);
        let climate = ClimateView::new(device.coordinator(quiet_config()).await);

        climate.turn_off().await.unwrap();

        let sent = device.sent();
        assert!(!sent[0].power);
        assert_eq!(sent[0].mode, Mode::Dry);
    }

    #[tokio::test]
    async fn turn_on_sets_power_only() {
        let device = MockDevice::new(initial_state());
        let climate = ClimateView::new(device.coordinator(quiet_config()).await);

        climate.turn_on().await.unwrap();

        let sent = device.sent();
        assert!(sent[0].power);
        assert_eq!(sent[0].mode, initial_state().mode);
    }

    #[tokio::test]
    async fn out_of_range_target_rejected_without_io() {
        let device = MockDevice::new(initial_state());
        let climate = ClimateView::new(device.coordinator(quiet_config()).await);

        let err = climate.set_target_temperature(40).await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));

        let err = climate.set_target_temperature(15).await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));

        assert_eq!(device.sends(), 0);
    }

    #[tokio::test]
    async fn fan_mode_by_name() {
        let device = MockDevice::new(initial_state());
        let climate = ClimateView::new(device.coordinator(quiet_config()).await);

        assert_eq!(climate.fan_modes().len(), 9);
        assert_eq!(climate.fan_modes()[0], "Auto");

        climate.set_fan_mode("Turbo").await.unwrap();
        assert_eq!(device.sent()[0].fan_speed, FanSpeed::Turbo);

        let err = climate.set_fan_mode("Hurricane").await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert_eq!(device.sends(), 1);
    }

    #[tokio::test]
    async fn swing_mode_sets_both_axes() {
        let device = MockDevice::new(initial_state());
        let climate = ClimateView::new(device.coordinator(quiet_config()).await);

        climate.set_swing_mode(SwingMode::Both).await.unwrap();

        let sent = device.sent();
        assert_eq!(sent[0].horizontal_flow, HorizontalFlow::Swing);
        assert_eq!(sent[0].vertical_flow, VerticalFlow::Swing);
    }
}

// ============================================================================
// Flow selects
// ============================================================================

mod flow_select {
    use super::*;

    #[tokio::test]
    async fn options_in_code_order() {
        let device = MockDevice::new(initial_state());
        let coordinator = device.coordinator(quiet_config()).await;
        let horizontal = FlowSelect::horizontal(coordinator.clone());
        let vertical = FlowSelect::vertical(coordinator);

        assert_eq!(horizontal.axis(), FlowAxis::Horizontal);
        assert_eq!(horizontal.options().len(), 9);
        assert_eq!(horizontal.options()[3], "Left_Center");
        assert_eq!(vertical.options().len(), 7);
        assert_eq!(vertical.options()[6], "Bottom");
        assert_eq!(vertical.current_option(), Some("Stop"));
    }

    #[tokio::test]
    async fn select_option_confirms_immediately() {
        let device = MockDevice::new(initial_state());
        let select = FlowSelect::horizontal(device.coordinator(quiet_config()).await);

        let confirmed = select.select_option("Left_Center").await.unwrap();

        assert_eq!(device.sends(), 1);
        assert_eq!(device.requests(), 2);
        assert_eq!(confirmed.sequence(), 2);
        assert_eq!(confirmed.state().horizontal_flow, HorizontalFlow::LeftCenter);
        assert_eq!(select.current_option(), Some("Left_Center"));
    }

    #[tokio::test]
    async fn unknown_option_rejected_without_io() {
        let device = MockDevice::new(initial_state());
        let select = FlowSelect::vertical(device.coordinator(quiet_config()).await);

        let err = select.select_option("Sideways").await.unwrap_err();

        assert!(matches!(err, Error::InvalidState(_)));
        assert_eq!(device.sends(), 0);
        assert_eq!(device.requests(), 1);
    }
}

// ============================================================================
// Display switch
// ============================================================================

mod display {
    use super::*;

    #[tokio::test]
    async fn unit_without_display_is_unavailable() {
        let device = MockDevice::new(initial_state());
        let switch = DisplaySwitch::new(device.coordinator(quiet_config()).await);

        assert_eq!(switch.is_on(), None);
        assert!(!switch.available());
    }

    #[tokio::test]
    async fn toggles_reported_display() {
        let mut state = initial_state();
        state.display = Some(false);
        let device = MockDevice::new(state);
        let switch = DisplaySwitch::new(device.coordinator(quiet_config()).await);

        assert_eq!(switch.is_on(), Some(false));
        assert!(switch.available());

        switch.turn_on().await.unwrap();
        assert_eq!(device.sent()[0].display, Some(true));
    }
}

// ============================================================================
// Bound views and view sets
// ============================================================================

mod composition {
    use super::*;

    #[tokio::test]
    async fn bound_view_subscription_sees_projection() {
        let device = MockDevice::new(initial_state());
        let coordinator = device.coordinator(quiet_config()).await;
        let power = BoundView::new(
            coordinator.clone(),
            |state| state.power,
            |state, on: bool| {
                state.power = on;
                Ok(())
            },
        );

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let id = power
            .subscribe(move |on| seen_clone.lock().push(on))
            .unwrap();

        power.set_and_confirm(true).await.unwrap();
        assert_eq!(power.get(), Some(true));
        assert_eq!(*seen.lock(), vec![true]);

        assert!(power.unsubscribe(id));
    }

    #[tokio::test]
    async fn view_set_honors_toggles() {
        let device = MockDevice::new(initial_state());
        let coordinator = device.coordinator(quiet_config()).await;

        let all = ViewSet::from_config(&coordinator);
        assert_eq!(all.len(), 4);

        let toggles = ViewToggles {
            climate: true,
            display: false,
            ..ViewToggles::default()
        };
        let some = ViewSet::new(&coordinator, &toggles);
        assert!(some.climate.is_some());
        assert!(some.display.is_none());
        assert_eq!(some.len(), 3);

        let none = ViewSet::new(&coordinator, &ViewToggles::none());
        assert!(none.is_empty());
    }
}
