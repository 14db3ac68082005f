#![no_std]
#![no_main]

use testsuite as _;

#[defmt_test::tests]
mod tests {
    use defmt::{assert, assert_eq};
    use sinebox::ambient::AmbientMonitor;
    use sinebox::config;
    use sinebox::leds::LedAnimator;
    use sinebox::menu::{DirInput, Entry, MenuState};
    use sinebox::settings::Settings;
    use sinebox::tone::pace_interval_ticks;
    use sinebox::wave;

    #[test]
    fn wave_table_is_symmetric_and_in_range() {
        let mut buffer = [0; config::wave::SAMPLES_PER_PERIOD];
        wave::fill_with_sine(&mut buffer);

        assert_eq!(buffer[0], config::wave::OUT_MID);
        assert_eq!(buffer[15], config::wave::OUT_MAX);
        assert_eq!(buffer[45], 0);
        for i in 0..=15 {
            assert_eq!(buffer[i], buffer[30 - i]);
        }
        for &sample in buffer.iter() {
            assert!(sample <= config::wave::OUT_MAX);
        }
    }

    #[test]
    fn wave_regeneration_is_idempotent() {
        let mut first = [0; config::wave::SAMPLES_PER_PERIOD];
        wave::fill_with_sine(&mut first);

        let mut buffer = first;
        wave::fill_with_silence(&mut buffer);
        wave::fill_with_sine(&mut buffer);
        assert_eq!(buffer, first);
    }

    #[test]
    fn pace_interval_is_rounded_and_bounded() {
        assert_eq!(pace_interval_ticks(440), 341);
        assert_eq!(pace_interval_ticks(config::tone::FREQ_HZ_MIN), 15_000);
        assert_eq!(pace_interval_ticks(config::tone::FREQ_HZ_MAX), 188);
    }

    #[test]
    fn menu_wraps_both_directions() {
        let mut menu = MenuState::new();
        assert!(menu.select(DirInput { up: false, down: true }));
        assert_eq!(menu.active(), Entry::Volume);
        assert!(menu.select(DirInput { up: true, down: false }));
        assert_eq!(menu.active(), Entry::Frequency);
    }

    #[test]
    fn corrupt_settings_decode_to_none() {
        let mut record = Settings::DEFAULT.encode();
        record[4] = 99;
        assert!(Settings::decode(&record).is_none());
        assert_eq!(
            Settings::decode(&Settings::DEFAULT.encode()),
            Some(Settings::DEFAULT)
        );
    }

    #[test]
    fn led_chase_clears_the_previous_pair() {
        let mut animator = LedAnimator::new();
        let mut previous = 0;
        let mut steps = 0;
        while steps < 20 {
            if let Some(step) = animator.tick(791) {
                assert_eq!(step.off, previous);
                assert_eq!((step.on & 0xFF00).count_ones(), 1);
                assert_eq!((step.on & 0x00FF).count_ones(), 1);
                previous = step.on;
                steps += 1;
            }
        }
    }

    #[test]
    fn ambient_mode_flips_on_threshold_crossings() {
        let mut monitor = AmbientMonitor::new(500);
        assert!(!monitor.is_dark());
        assert!(monitor.update(config::light::DARK_THRESHOLD_LUX - 1));
        assert!(monitor.is_dark());
        assert!(monitor.update(config::light::DARK_THRESHOLD_LUX));
        assert!(!monitor.is_dark());
    }
}
