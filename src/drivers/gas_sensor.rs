// Breathalyzer - MQ-3 Gas Sensor (ADC)
//
// One-shot ADC reads via raw ESP-IDF calls.  GPIO2 / ADC1_CHANNEL_2 with
// 11 dB attenuation, 12-bit results (0-4095).

use esp_idf_sys::esp;

use breathalyzer::hal::GasSensor;

use breathalyzer::config::*;

pub struct Mq3Sensor {
    handle: esp_idf_sys::adc_oneshot_unit_handle_t,
    channel: esp_idf_sys::adc_channel_t,
}

impl Mq3Sensor {
    pub fn new() -> anyhow::Result<Self> {
        let mut handle: esp_idf_sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
        let channel = PIN_GAS_SENSOR_ADC as esp_idf_sys::adc_channel_t;

        // SAFETY: plain C configuration structs; the handle is owned by this
        // driver and released in `Drop`.
        unsafe {
            let unit_cfg = esp_idf_sys::adc_oneshot_unit_init_cfg_t {
                unit_id: esp_idf_sys::adc_unit_t_ADC_UNIT_1,
                ulp_mode: esp_idf_sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..core::mem::zeroed()
            };
            esp!(esp_idf_sys::adc_oneshot_new_unit(&unit_cfg, &mut handle))?;

            let chan_cfg = esp_idf_sys::adc_oneshot_chan_cfg_t {
                atten: esp_idf_sys::adc_atten_t_ADC_ATTEN_DB_11,
                bitwidth: esp_idf_sys::adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            esp!(esp_idf_sys::adc_oneshot_config_channel(handle, channel, &chan_cfg))?;
        }

        log::info!("MQ-3 on ADC1 channel {} initialised", PIN_GAS_SENSOR_ADC);
        Ok(Self { handle, channel })
    }
}

impl GasSensor for Mq3Sensor {
    fn read_raw(&mut self) -> anyhow::Result<u16> {
        let mut raw: i32 = 0;
        // SAFETY: `handle` was created in `new` and is still live.
        unsafe {
            esp!(esp_idf_sys::adc_oneshot_read(self.handle, self.channel, &mut raw))?;
        }
        Ok(raw.clamp(0, u16::MAX as i32) as u16)
    }
}

impl Drop for Mq3Sensor {
    fn drop(&mut self) {
        unsafe {
            esp_idf_sys::adc_oneshot_del_unit(self.handle);
        }
    }
}
